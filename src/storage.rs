//! Key-value storage backends for persisted SDK state.
//!
//! The favorites store only needs two operations: read a string under a key
//! and overwrite the string under a key. [`FileStore`] keeps one file per key
//! on disk; [`MemoryStore`] lives for the process only.

use crate::error::{Result, TcgError};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// String key-value storage.
///
/// `read` returns `Ok(None)` for a key that was never written.
pub trait KeyValueStore: Send {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, e.g. to simulate data left by a previous session.
    pub fn with_value(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Stores each key as a file in a directory.
///
/// Writes go to a temp file in the same directory which is then renamed over
/// the target, so an interrupted write never leaves a truncated value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    ///
    /// Keys are used as file names as-is, so they may only contain
    /// `[A-Za-z0-9._-]` and must not be `.` or `..`. Anything else is
    /// rejected rather than rewritten, keeping distinct keys in distinct
    /// files.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let safe = key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !safe || key.is_empty() || key == "." || key == ".." {
            return Err(TcgError::InvalidArgument(format!(
                "Invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&path)
            .map_err(|e| TcgError::Storage(format!("{}: {}", path.display(), e.error)))?;
        log::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}
