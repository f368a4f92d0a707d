//! In-process storage area

use indexmap::IndexMap;

use super::Storage;
use crate::error::StorageError;

/// A storage area held in memory.
///
/// Supports an optional byte quota, counted as the sum of key and value
/// lengths, and a disabled mode in which every access fails the way a
/// blocked browser storage area does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: IndexMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStorage {
    /// Create an empty, unbounded area.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty area that refuses writes beyond `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Default::default()
        }
    }

    /// Create an area that rejects every access.
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Default::default()
        }
    }

    /// Bytes currently used by keys and values.
    pub fn usage(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Key at position `index` in insertion order.
    pub fn key(&self, index: usize) -> Option<&str> {
        self.items.get_index(index).map(|(k, _)| k.as_str())
    }

    fn check_enabled(&self) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::security("storage access is disabled"));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_enabled()?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_enabled()?;
        if let Some(quota) = self.quota {
            let replaced = self.items.get(key).map_or(0, |old| key.len() + old.len());
            let needed = self.usage() - replaced + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::quota_exceeded(format!(
                    "setting '{}' needs {} bytes, quota is {}",
                    key, needed, quota
                )));
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_enabled()?;
        self.items.shift_remove(key);
        Ok(())
    }

    fn len(&self) -> usize {
        if self.disabled {
            0
        } else {
            self.items.len()
        }
    }
}
