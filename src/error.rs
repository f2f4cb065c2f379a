//! Error types for Elidune Desk

use chrono::NaiveDate;
use thiserror::Error;

/// Numeric error codes, also used as the CLI exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NoSuchUser = 4,
    NoSuchItem = 5,
    ItemNotAvailable = 7,
    BadValue = 18,
    NoSuchData = 20,
    AlreadyReturned = 22,
}

/// Kind of record an id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Book,
    Member,
    Loan,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Entity::Book => "Book",
            Entity::Member => "Member",
            Entity::Loan => "Loan",
        };
        write!(f, "{}", label)
    }
}

/// Main application error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: Entity, id: i32 },

    #[error("No copies available for \"{title}\" (book {book_id})")]
    NoCopiesAvailable { book_id: i32, title: String },

    #[error("Loan {loan_id} was already returned on {returned_on}")]
    AlreadyReturned { loan_id: i32, returned_on: NaiveDate },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    pub fn not_found(entity: Entity, id: i32) -> Self {
        AppError::NotFound { entity, id }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound { entity: Entity::Book, .. } => ErrorCode::NoSuchItem,
            AppError::NotFound { entity: Entity::Member, .. } => ErrorCode::NoSuchUser,
            AppError::NotFound { entity: Entity::Loan, .. } => ErrorCode::NoSuchData,
            AppError::NoCopiesAvailable { .. } => ErrorCode::ItemNotAvailable,
            AppError::AlreadyReturned { .. } => ErrorCode::AlreadyReturned,
            AppError::Validation(_) => ErrorCode::BadValue,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Persistence failures. These never leave the repository layer.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
