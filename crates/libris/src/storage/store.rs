//! The collection's persisted format

use tracing::debug;

use super::{storage_available, Storage};
use crate::book::Book;
use crate::error::{LibraryError, Result};

/// Encode books the way the catalog has always stored them.
///
/// Each book is serialized to a JSON string on its own, then the list of
/// those strings is serialized again. Existing stores depend on this two-layer
/// shape, so a plain JSON array of records would not read them.
pub fn encode_books(books: &[Book]) -> Result<String> {
    let records = books
        .iter()
        .map(serde_json::to_string)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(serde_json::to_string(&records)?)
}

/// Decode the output of [`encode_books`]. An empty value is an empty list.
pub fn decode_books(raw: &str) -> Result<Vec<Book>> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    let records: Vec<String> = serde_json::from_str(raw)?;
    records
        .iter()
        .map(|record| serde_json::from_str::<Book>(record).map_err(LibraryError::from))
        .collect()
}

/// Reads and writes the collection under a fixed key of a storage area.
///
/// Every call re-checks the area; an unavailable area turns loads into
/// empty collections and saves into no-ops.
#[derive(Debug)]
pub struct LibraryStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> LibraryStore<S> {
    /// Create a store writing under `key`.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Key the collection is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the underlying area is usable.
    pub fn is_available(&mut self) -> bool {
        storage_available(&mut self.storage)
    }

    /// Read the persisted collection.
    ///
    /// Returns an empty list when the area is unavailable or holds nothing
    /// under the key.
    pub fn load(&mut self) -> Result<Vec<Book>> {
        if !self.is_available() {
            debug!(key = %self.key, "storage unavailable, starting empty");
            return Ok(Vec::new());
        }
        match self.storage.get_item(&self.key)? {
            Some(raw) => {
                let books = decode_books(&raw)?;
                debug!(key = %self.key, books = books.len(), "loaded library");
                Ok(books)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Write the collection, replacing whatever was stored.
    pub fn save(&mut self, books: &[Book]) -> Result<()> {
        if !self.is_available() {
            debug!(key = %self.key, "storage unavailable, save skipped");
            return Ok(());
        }
        let encoded = encode_books(books)?;
        self.storage.set_item(&self.key, &encoded)?;
        debug!(key = %self.key, books = books.len(), bytes = encoded.len(), "saved library");
        Ok(())
    }

    /// The underlying storage area.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store and return the storage area.
    pub fn into_inner(self) -> S {
        self.storage
    }
}
