//! JSON file adapter for the `TaskStore` port.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::ports::store::{TaskSnapshot, TaskStore};
use crate::task::Task;

/// On-disk shape of the store file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    version: u64,
    #[serde(default)]
    tasks: Vec<Task>,
}

/// Task store persisted as a single JSON file.
///
/// The version lives in the file alongside the tasks; the process-local
/// mutex serializes snapshot/commit pairs within one process, and the
/// version check catches writers from other processes.
pub struct JsonFileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store backed by the given file. The file is created on
    /// first commit; a missing file reads as an empty collection.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), guard: Mutex::new(()) }
    }

    /// The file this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<StoreFile, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::Serialize(e.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoreFile::default()),
            Err(e) => Err(StoreError::Unavailable(e.to_string())),
        }
    }

    fn write_file(&self, file: &StoreFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::Unavailable(e.to_string()))?;
            }
        }
        let raw = serde_json::to_string_pretty(file)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

impl TaskStore for JsonFileStore {
    fn snapshot(&self) -> Result<TaskSnapshot, StoreError> {
        let _guard = self.guard.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let file = self.read_file()?;
        Ok(TaskSnapshot { tasks: file.tasks, version: file.version })
    }

    fn commit(&self, tasks: Vec<Task>, expected_version: u64) -> Result<u64, StoreError> {
        let _guard = self.guard.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let current = self.read_file()?;
        if current.version != expected_version {
            return Err(StoreError::Conflict {
                expected: expected_version,
                actual: current.version,
            });
        }
        let next = StoreFile { version: current.version + 1, tasks };
        self.write_file(&next)?;
        Ok(next.version)
    }
}
