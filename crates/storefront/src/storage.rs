//! File-backed slot storage.
//!
//! Each slot is a single JSON file, `{dir}/{key}.json`. Writes land in a
//! sibling temp file first and are renamed into place, so a crash mid-write
//! leaves the previous value intact rather than a truncated one. Every write
//! uses its own temp name: the server and the CLI may write the same slot.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use fakestore_core::cart::{SlotStorage, StorageError};
use uuid::Uuid;

const MAX_KEY_LENGTH: usize = 128;

/// Check that `key` can be used as a slot name.
///
/// Keys must be non-empty, at most 128 bytes, made of ASCII alphanumerics,
/// `-`, `_` and `.`, and must not start with `.`.
///
/// # Errors
///
/// Returns `StorageError::InvalidKey` if the key does not meet these rules.
pub fn validate_slot_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LENGTH
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Slot storage in a local directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` if `key` is not a valid slot name.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_slot_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SlotStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = self
            .dir
            .join(format!(".{key}.json.{}.tmp", Uuid::new_v4().simple()));
        fs::write(&tmp, value)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.slot_path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
