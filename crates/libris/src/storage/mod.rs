//! Key-value storage areas and the collection store built on them
//!
//! The [`Storage`] trait mirrors the Web Storage contract the catalog was
//! written against: string keys, string values, fallible writes that fail
//! with DOMException-shaped errors. [`LibraryStore`] layers the collection's
//! persisted format on top of any area.
//!
//! ```text
//! Library ──save──▶ LibraryStore ──set_item──▶ Storage (memory | file | host)
//!         ◀─load───              ◀─get_item───
//! ```

mod file;
mod memory;
mod store;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use store::{decode_books, encode_books, LibraryStore};

use tracing::debug;

use crate::error::StorageError;

/// Key written and removed again by [`storage_available`].
pub const SENTINEL_KEY: &str = "__storage_test__";

/// A string-to-string storage area with the Web Storage contract.
pub trait Storage {
    /// Value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;

    /// Number of stored items.
    fn len(&self) -> usize;

    /// Whether the area holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// Check whether a storage area is usable.
///
/// Writes and removes [`SENTINEL_KEY`]. Any failure means unavailable, except a
/// quota failure on an area that already holds data: the area works, it is
/// just full.
pub fn storage_available<S: Storage + ?Sized>(storage: &mut S) -> bool {
    let written = storage
        .set_item(SENTINEL_KEY, SENTINEL_KEY)
        .and_then(|()| storage.remove_item(SENTINEL_KEY));

    match written {
        Ok(()) => true,
        Err(err) => {
            let available = err.is_quota_exceeded() && !storage.is_empty();
            debug!(error = %err, available, "storage availability check failed");
            available
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_check_leaves_no_trace() {
        let mut storage = MemoryStorage::new();
        assert!(storage_available(&mut storage));
        assert!(storage.is_empty());
        assert_eq!(storage.get_item(SENTINEL_KEY).unwrap(), None);
    }

    #[test]
    fn test_disabled_area_unavailable() {
        let mut storage = MemoryStorage::disabled();
        assert!(!storage_available(&mut storage));
    }

    #[test]
    fn test_full_empty_area_unavailable() {
        let mut storage = MemoryStorage::with_quota(0);
        assert!(!storage_available(&mut storage));
    }

    #[test]
    fn test_full_area_with_content_available() {
        let mut storage = MemoryStorage::with_quota(8);
        storage.set_item("k", "v").unwrap();
        assert!(storage_available(&mut storage));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_boxed_dyn_storage() {
        let mut storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
        storage.set_item("a", "1").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));
        assert!(storage_available(&mut storage));
    }
}
