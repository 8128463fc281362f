//! File-backed key/value storage, the client's stand-in for a browser's
//! local storage.
//!
//! The whole file is one JSON object mapping keys to string values. It is
//! read on every access and rewritten on every write.
use std::collections::BTreeMap;
use std::fs::{create_dir_all, read_to_string, write};
use std::io;
use std::path::{Path, PathBuf};

use derive_more::Display;

/// Failure to read or write the storage file.
#[derive(Debug, Display)]
pub enum StorageError {
    /// The file could not be read or written.
    #[display(fmt = "local storage io error: {}", _0)]
    Io(io::Error),
    /// The file is not a JSON object of strings.
    #[display(fmt = "local storage is corrupt: {}", _0)]
    Json(serde_json::Error),
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

/// Key/value entries persisted in a single JSON file.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    /// Location of the JSON file.
    path: PathBuf,
}

impl LocalStorage {
    /// Storage kept in the file at `path`. Nothing is touched until the
    /// first read or write.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value stored under `key`. A missing file holds no entries.
    ///
    /// # Errors
    /// Errors if the file exists but cannot be read or parsed.
    pub fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.remove(key))
    }

    /// Store `value` under `key`, keeping every other entry.
    ///
    /// A corrupt file is replaced rather than blocking the write.
    ///
    /// # Errors
    /// Errors if the file or its parent directory cannot be written.
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries().unwrap_or_else(|err| {
            tracing::warn!("Replacing unreadable local storage at {}: {err}", self.path.display());
            BTreeMap::new()
        });
        entries.insert(key.to_owned(), value.to_owned());
        if let Some(parent) = self.path.parent() {
            create_dir_all(parent)?;
        }
        write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }

    /// All entries in the file.
    fn entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}
