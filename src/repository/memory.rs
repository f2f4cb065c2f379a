//! In-process store for tests and dry runs

use std::sync::{Arc, Mutex, PoisonError};

use super::{Snapshot, Store};

/// Clones share the same contents, so a second catalog opened on a clone sees
/// what the first one saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(snapshot)),
        }
    }

    /// Copy of the last saved state
    pub fn snapshot(&self) -> Snapshot {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Store for MemoryStore {
    fn load_all(&self) -> Snapshot {
        self.snapshot()
    }

    fn save_all(&self, snapshot: &Snapshot) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = snapshot.clone();
    }
}
