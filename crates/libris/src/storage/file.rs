//! Disk-backed storage area

use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::Storage;
use crate::error::StorageError;

/// A storage area persisted as a JSON object in a single file.
///
/// The file is read once on open and rewritten after every mutation, so the
/// area survives process restarts the way browser local storage survives
/// reloads. A missing file is an empty area.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: IndexMap<String, String>,
}

impl FileStorage {
    /// Open the area stored at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let items = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                IndexMap::new()
            } else {
                serde_json::from_str(&raw)
                    .map_err(|e| StorageError::Corrupt(format!("{}: {}", path.display(), e)))?
            }
        } else {
            IndexMap::new()
        };
        debug!(path = %path.display(), items = items.len(), "opened file storage");
        Ok(Self { path, items })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.items)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let previous = self.items.insert(key.to_string(), value.to_string());
        if let Err(err) = self.flush() {
            match previous {
                Some(old) => {
                    self.items.insert(key.to_string(), old);
                }
                None => {
                    self.items.shift_remove(key);
                }
            }
            return Err(err);
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if let Some(old) = self.items.shift_remove(key) {
            if let Err(err) = self.flush() {
                self.items.insert(key.to_string(), old);
                return Err(err);
            }
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("none.json")).unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("local.json");
        {
            let mut storage = FileStorage::open(&path).unwrap();
            storage.set_item("a", "1").unwrap();
            storage.set_item("b", "2").unwrap();
            storage.remove_item("a").unwrap();
        }
        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get_item("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("local.json");
        fs::write(&path, "[1, 2").unwrap();
        let err = FileStorage::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }
}
