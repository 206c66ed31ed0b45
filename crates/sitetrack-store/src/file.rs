//! File-backed storage medium.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::storage::KeyValueStorage;

/// A key/value medium persisted as one JSON object on disk.
///
/// Plays the role browser local storage plays for the web front end: every
/// `set_item` rewrites the whole file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the file at `path`.
    ///
    /// Never fails, the same way browser storage never refuses a read: a
    /// missing file is an empty medium (created on first write), and a file
    /// that cannot be read or is not a JSON string map is treated as empty.
    /// Writes to an unusable path fail later, in `set_item`.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        let items = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(items) => items,
                Err(e) => {
                    warn!("Ignoring malformed storage file {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No storage file at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                warn!("Cannot read storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        debug!("Opened storage at {} ({} keys)", path.display(), items.len());
        Self { path, items }
    }

    /// Open the default storage location.
    pub fn open_default() -> Self {
        Self::open(crate::default_data_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let content = serde_json::to_string_pretty(&self.items)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let previous = self.items.insert(key.to_string(), value.to_string());

        if let Err(e) = self.flush() {
            // Keep memory consistent with what is on disk.
            match previous {
                Some(old) => self.items.insert(key.to_string(), old),
                None => self.items.remove(key),
            };
            return Err(e);
        }

        debug!("Wrote {} to {}", key, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let storage = FileStorage::open(&path);
        assert!(storage.get_item("visitorId").unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut storage = FileStorage::open(&path);
        storage.set_item("visitorId", "visitor_42").unwrap();
        drop(storage);

        let reopened = FileStorage::open(&path);
        assert_eq!(
            reopened.get_item("visitorId").unwrap().as_deref(),
            Some("visitor_42")
        );
    }

    #[test]
    fn test_malformed_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json at all").unwrap();

        let storage = FileStorage::open(&path);
        assert!(storage.get_item("siteVisitorData").unwrap().is_none());
    }

    #[test]
    fn test_failed_write_is_rolled_back() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes every read and write fail.
        let path = dir.path().join("storage.json");
        fs::create_dir(&path).unwrap();

        let mut storage = FileStorage::open(&path);
        assert!(storage.get_item("k").unwrap().is_none());
        assert!(storage.set_item("k", "v").is_err());
        assert!(storage.get_item("k").unwrap().is_none());
    }
}
