//! File-backed backend.
//!
//! Each key is one file inside the store directory. Writes go through a
//! temporary sibling and a rename, so a single entry is either the old value
//! or the new one, never a torn write.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{StorageError, StorageResult};
use crate::kv::KeyValueStore;

/// Directory-backed store.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the store directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(self.dir.join(key))
        } else {
            Err(StorageError::invalid_data(key, "key must be alphanumeric"))
        }
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.entry_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => Err(StorageError::invalid_data(
                key,
                "entry is not valid UTF-8",
            )),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.entry_path(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(key, e))?;

        let tmp = self.dir.join(format!(".{key}.tmp"));
        write_private(&tmp, value).map_err(|e| StorageError::io(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            StorageError::io(key, e)
        })
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }
}

/// Writes `value` to `path`, readable by the owner only on Unix.
fn write_private(path: &Path, value: &str) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()
}
