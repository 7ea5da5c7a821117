//! Key-value persistence collaborator.
//!
//! The block-list and rewrite mode survive restarts through a small
//! key-value store: `get`/`put` of string scalars and string lists. The
//! backing location comes from [`crate::config`]; [`JsonFileStorage`] keeps
//! one JSON object per file and rewrites it on every put,
//! [`MemoryStorage`] backs tests and hosts that persist elsewhere.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage errors.
///
/// Callers treat these as non-fatal: in-memory state stays authoritative
/// for the session and the next successful write resynchronizes.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error reading or writing the backing store.
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),

    /// The backing store held something other than a JSON object of values.
    #[error("storage format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// A persistable value: a string scalar or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A single string, e.g. a mode name.
    Text(String),
    /// A list of strings, e.g. blocked names.
    List(Vec<String>),
}

/// Key-value store surviving process restart.
pub trait Storage {
    /// Fetch the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: Value) -> Result<(), StorageError>;
}

/// File-backed storage: one JSON object per file, rewritten on every put.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl JsonFileStorage {
    /// Open the store at `path`, loading existing contents if present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl Storage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}

/// In-memory storage for tests and hosts that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, Value>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}
