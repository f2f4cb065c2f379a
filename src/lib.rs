//! Elidune Desk
//!
//! Book lending tracker for a single library desk: books, members and loans
//! kept in memory and written to disk as whole-collection JSON snapshots
//! after every change.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use services::{CatalogService, SharedCatalog};

/// Application state for one desk session
pub struct AppState {
    pub config: AppConfig,
    pub catalog: CatalogService,
}

impl AppState {
    /// Open the catalog stored under the configured data directory
    pub fn open(config: AppConfig) -> Self {
        let store = repository::JsonFileStore::new(&config.storage);
        Self {
            catalog: CatalogService::open(store),
            config,
        }
    }
}
