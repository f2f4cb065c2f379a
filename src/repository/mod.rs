//! Repository layer: whole-collection persistence

pub mod files;
pub mod memory;

use serde::{Deserialize, Serialize};

use crate::models::{Book, Loan, Member};

pub use files::JsonFileStore;
pub use memory::MemoryStore;

/// Full contents of the three collections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub books: Vec<Book>,
    pub members: Vec<Member>,
    pub loans: Vec<Loan>,
}

/// Persistence gateway.
///
/// Both operations are best-effort: implementations log failures and never
/// report them to the caller. A collection that cannot be read loads as empty.
#[cfg_attr(test, mockall::automock)]
pub trait Store: Send {
    fn load_all(&self) -> Snapshot;

    fn save_all(&self, snapshot: &Snapshot);
}
