//! Error types for catalog operations

use thiserror::Error;

/// DOMException code browsers other than Firefox use for a full storage area.
pub const QUOTA_EXCEEDED_CODE: u16 = 22;

/// DOMException code Firefox uses for a full storage area.
pub const NS_QUOTA_REACHED_CODE: u16 = 1014;

/// Exception name paired with [`QUOTA_EXCEEDED_CODE`].
pub const QUOTA_EXCEEDED_NAME: &str = "QuotaExceededError";

/// Exception name paired with [`NS_QUOTA_REACHED_CODE`].
pub const NS_QUOTA_REACHED_NAME: &str = "NS_ERROR_DOM_QUOTA_REACHED";

/// Errors raised by a [`Storage`](crate::storage::Storage) backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A DOMException-shaped failure, as thrown by browser storage
    #[error("{name} ({code}): {message}")]
    Dom {
        /// Legacy numeric exception code (0 when absent)
        code: u16,
        /// Exception name
        name: String,
        /// Human-readable detail
        message: String,
    },

    /// Filesystem failure in a disk-backed area
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A disk-backed area whose file is not a JSON object of strings
    #[error("Storage area is corrupt: {0}")]
    Corrupt(String),
}

impl StorageError {
    /// The error a full storage area raises.
    pub fn quota_exceeded(message: impl Into<String>) -> Self {
        StorageError::Dom {
            code: QUOTA_EXCEEDED_CODE,
            name: QUOTA_EXCEEDED_NAME.to_string(),
            message: message.into(),
        }
    }

    /// The error a storage area blocked by the host raises on any access.
    pub fn security(message: impl Into<String>) -> Self {
        StorageError::Dom {
            code: 18,
            name: "SecurityError".to_string(),
            message: message.into(),
        }
    }

    /// Whether this error carries one of the recognized quota signatures.
    pub fn is_quota_exceeded(&self) -> bool {
        match self {
            StorageError::Dom { code, name, .. } => {
                *code == QUOTA_EXCEEDED_CODE
                    || *code == NS_QUOTA_REACHED_CODE
                    || name == QUOTA_EXCEEDED_NAME
                    || name == NS_QUOTA_REACHED_NAME
            }
            _ => false,
        }
    }
}

/// Main error type for catalog operations
#[derive(Error, Debug)]
pub enum LibraryError {
    /// The storage backend failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Persisted data could not be encoded or decoded
    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// A control referred to a book that is no longer in the collection
    #[error("Index {index} out of range for library of {len} books")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Collection length at the time of the request
        len: usize,
    },

    /// A click landed on an element that is not a card control
    #[error("Element '{0}' is not a bound control")]
    UnknownControl(String),

    /// Configuration could not be parsed
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, LibraryError>;
