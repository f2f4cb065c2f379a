//! JSON file store, one document per collection

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use super::{Snapshot, Store};
use crate::{config::StorageConfig, error::StoreError};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    books_path: PathBuf,
    members_path: PathBuf,
    loans_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            books_path: config.data_dir.join(&config.books_file),
            members_path: config.data_dir.join(&config.members_file),
            loans_path: config.data_dir.join(&config.loans_file),
        }
    }

    /// Store using the default file names inside `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(&StorageConfig {
            data_dir: dir.into(),
            ..StorageConfig::default()
        })
    }

    pub fn books_path(&self) -> &Path {
        &self.books_path
    }

    pub fn members_path(&self) -> &Path {
        &self.members_path
    }

    pub fn loans_path(&self) -> &Path {
        &self.loans_path
    }

    fn load_collection<T: DeserializeOwned>(path: &Path) -> Vec<T> {
        match read_collection(path) {
            Ok(records) => {
                tracing::debug!("Loaded {} records from {}", records.len(), path.display());
                records
            }
            Err(e) => {
                tracing::error!("Failed to read {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    fn save_collection<T: Serialize>(path: &Path, records: &[T]) {
        if let Err(e) = write_collection(path, records) {
            tracing::error!("Failed to write {}: {}", path.display(), e);
        }
    }
}

impl Store for JsonFileStore {
    fn load_all(&self) -> Snapshot {
        Snapshot {
            books: Self::load_collection(&self.books_path),
            members: Self::load_collection(&self.members_path),
            loans: Self::load_collection(&self.loans_path),
        }
    }

    fn save_all(&self, snapshot: &Snapshot) {
        Self::save_collection(&self.books_path, &snapshot.books);
        Self::save_collection(&self.members_path, &snapshot.members);
        Self::save_collection(&self.loans_path, &snapshot.loans);
    }
}

/// Missing file reads as an empty collection
fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_slice(&bytes)?)
}

/// Replace the file contents through a sibling temp file
fn write_collection<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_vec_pretty(records)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
