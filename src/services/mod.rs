//! Business logic services
//!
//! [`CatalogService`] owns the books, members and loans collections. Each
//! mutation writes the full snapshot through the [`Store`] before returning.

pub mod books;
pub mod loans;
pub mod members;

use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    error::{AppError, AppResult, Entity},
    repository::{Snapshot, Store},
};

pub struct CatalogService {
    data: Snapshot,
    store: Box<dyn Store>,
}

impl CatalogService {
    /// Load all collections from `store` and take ownership of it
    pub fn open(store: impl Store + 'static) -> Self {
        let data = store.load_all();
        tracing::info!(
            "Catalog loaded: {} books, {} members, {} loans",
            data.books.len(),
            data.members.len(),
            data.loans.len()
        );
        Self {
            data,
            store: Box::new(store),
        }
    }

    /// Replace in-memory state with what the store currently holds
    pub fn reload(&mut self) {
        self.data = self.store.load_all();
    }

    /// Write the full snapshot. Mutations call this before returning.
    pub fn save(&self) {
        self.store.save_all(&self.data);
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.data
    }
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("books", &self.data.books.len())
            .field("members", &self.data.members.len())
            .field("loans", &self.data.loans.len())
            .finish()
    }
}

/// Max existing id + 1; the first record gets 1
fn next_id<T>(entity: Entity, records: &[T], id: impl Fn(&T) -> i32) -> AppResult<i32> {
    records
        .iter()
        .map(id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| AppError::Validation(format!("{} ids are exhausted", entity)))
}

/// Catalog behind a single lock, for callers on several threads.
///
/// Every operation runs with the lock held, which also keeps id assignment
/// collision-free.
#[derive(Clone)]
pub struct SharedCatalog {
    inner: Arc<Mutex<CatalogService>>,
}

impl SharedCatalog {
    pub fn new(catalog: CatalogService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(catalog)),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut CatalogService) -> R) -> R {
        let mut catalog = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut catalog)
    }
}
