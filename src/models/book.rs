//! Book model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Book record held in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_copies: u32,
    pub available_copies: u32,
    #[serde(default)]
    pub category: String,
}

impl Book {
    /// Change the number of owned copies.
    ///
    /// The available count moves by the same delta, floored at 0. The total
    /// is floored at 1.
    pub fn set_total_copies(&mut self, total_copies: u32) {
        let diff = i64::from(total_copies) - i64::from(self.total_copies);
        self.total_copies = total_copies.max(1);
        let available = (i64::from(self.available_copies) + diff).max(0);
        self.available_copies = u32::try_from(available)
            .unwrap_or(u32::MAX)
            .min(self.total_copies);
    }

    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }

    /// Number of copies currently out on loan
    pub fn on_loan(&self) -> u32 {
        self.total_copies.saturating_sub(self.available_copies)
    }

    pub(crate) fn issue_one(&mut self) -> bool {
        if self.available_copies > 0 {
            self.available_copies -= 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn return_one(&mut self) {
        if self.available_copies < self.total_copies {
            self.available_copies += 1;
        }
    }

    /// Case-insensitive match on title, author or ISBN
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.title.to_lowercase().contains(&needle)
            || self.author.to_lowercase().contains(&needle)
            || self.isbn.to_lowercase().contains(&needle)
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} - {} ({}/{})",
            self.id, self.title, self.author, self.available_copies, self.total_copies
        )
    }
}

/// Create book request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_copies: u32,
    pub category: String,
}

impl NewBook {
    pub(crate) fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            total_copies: self.total_copies,
            category: self.category.trim().to_string(),
        }
    }
}

/// Partial book update; `None` keeps the current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookEdit {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub total_copies: Option<u32>,
    pub category: Option<String>,
}

impl BookEdit {
    pub(crate) fn apply_to(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title.trim().to_string();
        }
        if let Some(author) = self.author {
            book.author = author.trim().to_string();
        }
        if let Some(isbn) = self.isbn {
            book.isbn = isbn.trim().to_string();
        }
        if let Some(total) = self.total_copies {
            book.set_total_copies(total);
        }
        if let Some(category) = self.category {
            book.category = category.trim().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(total: u32, available: u32) -> Book {
        Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "9780441013593".to_string(),
            total_copies: total,
            available_copies: available,
            category: "Fiction".to_string(),
        }
    }

    #[test]
    fn test_set_total_copies_moves_available_by_delta() {
        let mut b = book(3, 1);
        b.set_total_copies(5);
        assert_eq!((b.total_copies, b.available_copies), (5, 3));

        b.set_total_copies(2);
        assert_eq!((b.total_copies, b.available_copies), (2, 0));
    }

    #[test]
    fn test_set_total_copies_floors_total_at_one() {
        let mut b = book(2, 2);
        b.set_total_copies(0);
        assert_eq!((b.total_copies, b.available_copies), (1, 0));
    }

    #[test]
    fn test_return_one_is_capped() {
        let mut b = book(2, 2);
        b.return_one();
        assert_eq!(b.available_copies, 2);
        assert!(b.issue_one());
        assert_eq!(b.on_loan(), 1);
    }

    #[test]
    fn test_matches_title_author_isbn() {
        let b = book(1, 1);
        assert!(b.matches("dune"));
        assert!(b.matches("HERBERT"));
        assert!(b.matches("0441"));
        assert!(b.matches("  "));
        assert!(!b.matches("asimov"));
    }

    #[test]
    fn test_display() {
        assert_eq!(book(2, 1).to_string(), "[1] Dune - Frank Herbert (1/2)");
    }
}
