//! # Libris
//!
//! A local-first book catalog.
//!
//! Users add books (title, author, page count, read status) through a form;
//! the collection renders as a list of cards and survives restarts in a
//! key-value storage area. There is no server and no background work: every
//! change happens inside a single UI event.
//!
//! ## Architecture
//!
//! - **Book / Library**: the record type and the ordered collection
//! - **Storage**: Web-Storage-shaped key-value areas and the collection store
//! - **Form**: presence validation and the exclusive read-status checkboxes
//! - **Render**: full rebuild of the card list from the collection
//! - **App**: the controller owning all state and dispatching UI events
//!
//! The page is modeled as a small element tree ([`dom`]) so the same logic
//! runs under a browser shim, a desktop shell or a test.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod book;
pub mod config;
pub mod dom;
pub mod error;
pub mod form;
pub mod library;
pub mod page;
pub mod render;
pub mod storage;

// Re-export main types
pub use app::{App, Notice, Outcome, UiEvent};
pub use book::{Book, Pages};
pub use config::LibraryConfig;
pub use dom::{Document, Element, NodeId};
pub use error::{LibraryError, Result, StorageError};
pub use form::{validate, Checkbox, Field, FormInput, FormState, ValidationError};
pub use library::Library;
pub use page::Page;
pub use render::{render, resolve_control, Control, ControlAction};
pub use storage::{
    decode_books, encode_books, storage_available, FileStorage, LibraryStore, MemoryStorage,
    Storage,
};

/// Libris version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
