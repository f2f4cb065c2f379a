//! Data models for Elidune Desk

pub mod book;
pub mod loan;
pub mod member;

// Re-export commonly used types
pub use book::{Book, BookEdit, NewBook};
pub use loan::{Loan, LoanDetails};
pub use member::{Member, MemberEdit, MemberKind, MemberRole, NewMember};
