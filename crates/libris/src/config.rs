//! Catalog configuration

use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, Result};

/// Configuration for the catalog page and its persistence.
///
/// The defaults reproduce the stock page: the `myLibrary` storage key, the
/// bundled SVG icons and the element ids the form is written against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Key the collection is stored under
    pub storage_key: String,

    /// Icon for the delete control
    pub delete_icon: String,

    /// Icon for the read toggle when the book has been read
    pub read_icon: String,

    /// Icon for the read toggle when the book has not been read
    pub unread_icon: String,

    /// Width and height applied to every control icon
    pub icon_size: String,

    /// Class of the element cards are rendered into
    pub library_class: String,

    /// Class of the form element warnings are attached to
    pub form_class: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            storage_key: "myLibrary".to_string(),
            delete_icon: "trash-solid.svg".to_string(),
            read_icon: "book-open-solid.svg".to_string(),
            unread_icon: "book-solid.svg".to_string(),
            icon_size: "15px".to_string(),
            library_class: "main-library".to_string(),
            form_class: "library-form".to_string(),
        }
    }
}

impl LibraryConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that stores the collection under a custom key.
    pub fn with_storage_key(key: impl Into<String>) -> Self {
        Self {
            storage_key: key.into(),
            ..Default::default()
        }
    }

    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LibraryError::Config(e.to_string()))
    }

    /// Icon path for a read toggle in the given state.
    pub fn read_toggle_icon(&self, have_read: bool) -> &str {
        if have_read {
            &self.read_icon
        } else {
            &self.unread_icon
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LibraryConfig::new();
        assert_eq!(config.storage_key, "myLibrary");
        assert_eq!(config.read_toggle_icon(true), "book-open-solid.svg");
        assert_eq!(config.read_toggle_icon(false), "book-solid.svg");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = LibraryConfig::from_json_str(r#"{"storage_key": "shelf"}"#).unwrap();
        assert_eq!(config.storage_key, "shelf");
        assert_eq!(config.delete_icon, "trash-solid.svg");
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = LibraryConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, LibraryError::Config(_)));
    }

    #[test]
    fn test_with_storage_key() {
        let config = LibraryConfig::with_storage_key("other");
        assert_eq!(config.storage_key, "other");
        assert_eq!(config.icon_size, "15px");
    }
}
