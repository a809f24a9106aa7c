//! Key-value persistence backends.
//!
//! The note store and the theme preference both talk to persistence through
//! [`KeyValueStore`], an opaque get/set string surface. [`FileStore`] keeps
//! the map in a single JSON file with atomic replace-on-write;
//! [`MemoryStore`] keeps it in memory for tests and embedders.

use std::{
    cell::RefCell,
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
    rc::Rc,
};

use log::{debug, warn};
use tempfile::NamedTempFile;

use crate::{KeepError, Result};

/// A blocking, synchronous string store keyed by short names.
pub trait KeyValueStore {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, overwriting any prior value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Shared handle to a key-value backend.
///
/// The process is single-threaded, so interior mutability through `RefCell`
/// is the only synchronization needed.
pub type SharedStore = Rc<RefCell<dyn KeyValueStore>>;

/// File-backed store: a flat string map serialized as pretty JSON.
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Opens the store backed by `path`, creating parent directories as
    /// needed.
    ///
    /// A missing backing file starts the store empty; a file that is not
    /// valid JSON is discarded with a warning rather than failing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating store directory: {}", parent.display());
                fs::create_dir_all(parent)?;
            }
        }

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(
                        "Store file {} is not valid JSON ({}), starting empty",
                        path.display(),
                        e
                    );
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        debug!(
            "Opened store {} with {} entries",
            path.display(),
            entries.len()
        );
        Ok(Self { path, entries })
    }

    /// Writes the whole map out through a temp file in the same directory,
    /// then atomically replaces the target.
    fn write_out(&self) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut temp_file = NamedTempFile::new_in(dir)?;
        let json = serde_json::to_string_pretty(&self.entries)?;
        temp_file.write_all(json.as_bytes())?;
        temp_file.flush()?;
        temp_file
            .persist(&self.path)
            .map_err(|e| KeepError::Io(e.error))?;

        debug!(
            "Wrote {} entries to {}",
            self.entries.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.write_out()
    }
}

/// In-memory store with no durability.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
