//! The catalog controller
//!
//! [`App`] owns every piece of mutable state: the collection, the transient
//! form state, the page and the store. Hosts feed it [`UiEvent`]s; each event
//! runs to completion and any mutation is persisted and re-rendered before
//! the call returns.

use std::fmt;
use tracing::{debug, warn};

use crate::book::Book;
use crate::config::LibraryConfig;
use crate::error::{LibraryError, Result};
use crate::form::{Checkbox, Field, FormState, ValidationError};
use crate::library::Library;
use crate::page::Page;
use crate::render::{self, ControlAction};
use crate::storage::{LibraryStore, Storage};

/// A user interaction with the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Text typed into one of the inputs
    Input {
        /// Which input
        field: Field,
        /// Its new text
        value: String,
    },
    /// A click on one of the read-status checkboxes
    CheckboxClicked(Checkbox),
    /// A click on the submit control
    Submit,
    /// A click on the element with this id
    Click(String),
}

/// What an event did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Only transient form state changed
    FormUpdated,
    /// A book was appended at `index`
    Added {
        /// Position of the new book
        index: usize,
    },
    /// The submission was refused
    Rejected(ValidationError),
    /// A book was removed
    Deleted(Book),
    /// A book's read flag changed
    Toggled {
        /// Position of the book
        index: usize,
        /// Its new read flag
        have_read: bool,
    },
}

/// A non-fatal problem the user should hear about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The stored collection could not be decoded and was ignored
    CorruptStore(String),
    /// The storage area failed while reading; saving is held back
    LoadFailed(String),
    /// A change could not be persisted
    SaveFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::CorruptStore(reason) => {
                write!(f, "Saved library could not be read and was reset: {}", reason)
            }
            Notice::LoadFailed(reason) => write!(
                f,
                "Saved library could not be loaded, changes are kept in memory: {}",
                reason
            ),
            Notice::SaveFailed(reason) => {
                write!(f, "Changes could not be saved: {}", reason)
            }
        }
    }
}

/// Application state for one catalog session.
///
/// # Example
///
/// ```
/// use libris::{App, Checkbox, Field, LibraryConfig, MemoryStorage, UiEvent};
///
/// let mut app = App::start(MemoryStorage::new(), LibraryConfig::default());
/// app.dispatch(UiEvent::Input { field: Field::Title, value: "Dune".into() }).unwrap();
/// app.dispatch(UiEvent::Input { field: Field::Author, value: "Herbert".into() }).unwrap();
/// app.dispatch(UiEvent::Input { field: Field::Pages, value: "412".into() }).unwrap();
/// app.dispatch(UiEvent::CheckboxClicked(Checkbox::Yes)).unwrap();
/// app.dispatch(UiEvent::Submit).unwrap();
///
/// assert_eq!(app.library().len(), 1);
/// assert_eq!(app.card_count(), 1);
/// ```
#[derive(Debug)]
pub struct App<S: Storage> {
    config: LibraryConfig,
    library: Library,
    form: FormState,
    page: Page,
    store: LibraryStore<S>,
    notices: Vec<Notice>,
    saves_held: bool,
}

impl<S: Storage> App<S> {
    /// Load the stored collection and draw the page.
    ///
    /// A stored value that cannot be decoded is reported as a
    /// [`Notice::CorruptStore`] and the session starts empty. A storage area
    /// that fails while reading is reported as a [`Notice::LoadFailed`]; the
    /// session starts empty and nothing is saved until [`App::reload`]
    /// succeeds, so the stored collection is never overwritten.
    pub fn start(storage: S, config: LibraryConfig) -> Self {
        let store = LibraryStore::new(storage, config.storage_key.clone());
        let mut app = Self {
            page: Page::new(&config),
            config,
            library: Library::new(),
            form: FormState::new(),
            store,
            notices: Vec::new(),
            saves_held: false,
        };
        match app.store.load() {
            Ok(books) => app.library = Library::from(books),
            Err(err @ LibraryError::Codec(_)) => {
                warn!(key = %app.store.key(), error = %err, "discarding unreadable library");
                app.raise(Notice::CorruptStore(err.to_string()));
            }
            Err(err) => {
                warn!(key = %app.store.key(), error = %err, "library not loaded, holding saves");
                app.saves_held = true;
                app.raise(Notice::LoadFailed(err.to_string()));
            }
        }
        app.render();
        debug!(books = app.library.len(), "catalog started");
        app
    }

    /// Retry a load that failed at startup.
    ///
    /// On success the stored books come first, followed by the books added
    /// during this session, and saving resumes. Does nothing if the startup
    /// load succeeded.
    pub fn reload(&mut self) -> Result<()> {
        if !self.saves_held {
            return Ok(());
        }
        let stored = self.store.load()?;
        let added = std::mem::take(&mut self.library);
        self.library = Library::from(stored);
        for book in added.iter() {
            self.library.push(book.clone());
        }
        self.saves_held = false;
        debug!(books = self.library.len(), "library reloaded");
        self.commit();
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Event Handling
    // ═══════════════════════════════════════════════════════════════════

    /// Handle one user interaction.
    ///
    /// Validation failures are an [`Outcome::Rejected`], not an error. Errors
    /// are reserved for clicks that do not land on a live control.
    pub fn dispatch(&mut self, event: UiEvent) -> Result<Outcome> {
        debug!(?event, "dispatch");
        match event {
            UiEvent::Input { field, value } => {
                self.page.set_input_value(field, &value);
                Ok(Outcome::FormUpdated)
            }
            UiEvent::CheckboxClicked(checkbox) => {
                self.form.click(&mut self.page, checkbox);
                Ok(Outcome::FormUpdated)
            }
            UiEvent::Submit => Ok(self.submit()),
            UiEvent::Click(id) => self.click(&id),
        }
    }

    /// Submit the form.
    pub fn submit(&mut self) -> Outcome {
        match self.form.submit(&mut self.page) {
            Ok(book) => {
                self.library.push(book);
                self.commit();
                Outcome::Added {
                    index: self.library.len() - 1,
                }
            }
            Err(err) => Outcome::Rejected(err),
        }
    }

    /// Activate the element with id `element_id`.
    ///
    /// Checkboxes and the submit control are routed to the form; anything
    /// else must be a card control.
    pub fn click(&mut self, element_id: &str) -> Result<Outcome> {
        if let Some(checkbox) = Checkbox::from_id(element_id) {
            self.form.click(&mut self.page, checkbox);
            return Ok(Outcome::FormUpdated);
        }
        if element_id == crate::page::SUBMIT_ID {
            return Ok(self.submit());
        }
        let control = render::resolve_control(&self.page, element_id)?;
        match control.action {
            ControlAction::Delete => self.delete(control.index).map(Outcome::Deleted),
            ControlAction::ToggleRead => {
                let have_read = self.toggle_read(control.index)?;
                Ok(Outcome::Toggled {
                    index: control.index,
                    have_read,
                })
            }
        }
    }

    /// Remove the book at `index`.
    pub fn delete(&mut self, index: usize) -> Result<Book> {
        let book = self.library.remove(index)?;
        self.commit();
        Ok(book)
    }

    /// Flip the read flag of the book at `index`, returning the new value.
    pub fn toggle_read(&mut self, index: usize) -> Result<bool> {
        self.library.toggle_read(index)?;
        self.commit();
        Ok(self.library.get(index).map_or(false, |b| b.have_read))
    }

    /// Persist then redraw. A failed save keeps the in-memory change.
    fn commit(&mut self) {
        if self.saves_held {
            debug!(key = %self.store.key(), "save held until the library loads");
        } else {
            match self.store.save(self.library.as_slice()) {
                Ok(()) => self.page.clear_notice(),
                Err(err) => {
                    warn!(key = %self.store.key(), error = %err, "library not saved");
                    self.raise(Notice::SaveFailed(err.to_string()));
                }
            }
        }
        self.render();
    }

    /// Record a notice and show it on the page.
    fn raise(&mut self, notice: Notice) {
        self.page.show_notice(&notice.to_string());
        self.notices.push(notice);
    }

    fn render(&mut self) {
        render::render(&mut self.page, &self.library, &self.config);
    }

    // ═══════════════════════════════════════════════════════════════════
    // Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// The collection.
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// The page as currently drawn.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Transient form state.
    pub fn form_state(&self) -> &FormState {
        &self.form
    }

    /// Active configuration.
    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// The store backing this session.
    pub fn store(&self) -> &LibraryStore<S> {
        &self.store
    }

    /// Whether saving is held back after a failed load.
    pub fn saves_held(&self) -> bool {
        self.saves_held
    }

    /// Notices raised so far.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain the notices raised so far.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Number of cards on the page.
    pub fn card_count(&self) -> usize {
        render::card_count(&self.page)
    }

    /// End the session and hand back the storage area.
    pub fn into_storage(self) -> S {
        self.store.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn fill(app: &mut App<MemoryStorage>, title: &str, author: &str, pages: &str) {
        for (field, value) in [
            (Field::Title, title),
            (Field::Author, author),
            (Field::Pages, pages),
        ] {
            app.dispatch(UiEvent::Input {
                field,
                value: value.to_string(),
            })
            .unwrap();
        }
    }

    #[test]
    fn test_submit_appends_and_renders() {
        let mut app = App::start(MemoryStorage::new(), LibraryConfig::default());
        fill(&mut app, "Dune", "Herbert", "412");
        app.dispatch(UiEvent::CheckboxClicked(Checkbox::No)).unwrap();

        let outcome = app.dispatch(UiEvent::Submit).unwrap();
        assert_eq!(outcome, Outcome::Added { index: 0 });
        assert_eq!(app.card_count(), 1);
        assert!(!app.library().get(0).unwrap().have_read);
    }

    #[test]
    fn test_click_routes_form_controls() {
        let mut app = App::start(MemoryStorage::new(), LibraryConfig::default());
        fill(&mut app, "Dune", "Herbert", "412");
        assert_eq!(app.click("yes").unwrap(), Outcome::FormUpdated);
        assert_eq!(app.form_state().selected(), Some(Checkbox::Yes));
        assert_eq!(app.click("submit").unwrap(), Outcome::Added { index: 0 });
    }

    #[test]
    fn test_card_controls() {
        let mut app = App::start(MemoryStorage::new(), LibraryConfig::default());
        fill(&mut app, "Dune", "Herbert", "412");
        app.click("yes").unwrap();
        app.submit();
        app.submit();

        let outcome = app.click("readToggle1").unwrap();
        assert_eq!(
            outcome,
            Outcome::Toggled {
                index: 1,
                have_read: false
            }
        );

        let outcome = app.click("deleteButton0").unwrap();
        assert!(matches!(outcome, Outcome::Deleted(ref b) if b.have_read));
        assert_eq!(app.library().len(), 1);
        assert_eq!(app.card_count(), 1);

        // Index 1 no longer exists after the rebuild
        assert!(matches!(
            app.click("deleteButton1"),
            Err(LibraryError::UnknownControl(_))
        ));
    }

    #[test]
    fn test_stale_index_rejected() {
        let mut app = App::start(MemoryStorage::new(), LibraryConfig::default());
        assert!(matches!(
            app.delete(0),
            Err(LibraryError::IndexOutOfRange { index: 0, len: 0 })
        ));
        assert!(app.toggle_read(3).is_err());
    }

    #[test]
    fn test_notice_display() {
        let notice = Notice::SaveFailed("full".into());
        assert_eq!(notice.to_string(), "Changes could not be saved: full");
    }

    #[test]
    fn test_notice_is_shown_until_next_save() {
        let mut storage = MemoryStorage::new();
        storage.set_item("myLibrary", "{").unwrap();
        let mut app = App::start(storage, LibraryConfig::default());
        let shown = app.page().notice_text().unwrap();
        assert!(shown.starts_with("Saved library could not be read and was reset"));

        fill(&mut app, "Dune", "Herbert", "412");
        app.click("no").unwrap();
        app.submit();
        assert_eq!(app.page().notice_text(), None);
        assert_eq!(app.notices().len(), 1);
    }

    #[test]
    fn test_reload_without_failure_is_noop() {
        let mut app = App::start(MemoryStorage::new(), LibraryConfig::default());
        assert!(!app.saves_held());
        app.reload().unwrap();
        assert!(app.library().is_empty());
        assert_eq!(app.store().storage().get_item("myLibrary").unwrap(), None);
    }
}
