//! Book management

use validator::Validate;

use super::{next_id, CatalogService};
use crate::{
    error::{AppError, AppResult, Entity},
    models::{Book, BookEdit, NewBook},
};

impl CatalogService {
    pub fn books(&self) -> &[Book] {
        &self.data.books
    }

    pub fn find_book(&self, id: i32) -> AppResult<&Book> {
        self.data
            .books
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::not_found(Entity::Book, id))
    }

    /// Books whose title, author or ISBN contains `query`. A blank query
    /// returns every book.
    pub fn search_books(&self, query: &str) -> Vec<&Book> {
        self.data.books.iter().filter(|b| b.matches(query)).collect()
    }

    /// Add a book. A zero copy count is raised to 1 and every copy starts
    /// available.
    pub fn add_book(&mut self, book: NewBook) -> AppResult<Book> {
        let book = book.trimmed();
        book.validate()?;

        let total_copies = book.total_copies.max(1);
        let created = Book {
            id: next_id(Entity::Book, &self.data.books, |b| b.id)?,
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            total_copies,
            available_copies: total_copies,
            category: book.category,
        };
        self.data.books.push(created.clone());
        self.save();

        tracing::info!(
            "Added book id={} \"{}\" ({} copies)",
            created.id,
            created.title,
            created.total_copies
        );
        Ok(created)
    }

    /// Overwrite every field of the stored book with the same id.
    ///
    /// Use [`Book::set_total_copies`] on the value first to carry the copy
    /// delta over to the available count. The stored available count is
    /// clamped to the total.
    pub fn update_book(&mut self, book: Book) -> AppResult<Book> {
        if book.title.trim().is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }

        let existing = self
            .data
            .books
            .iter_mut()
            .find(|b| b.id == book.id)
            .ok_or_else(|| AppError::not_found(Entity::Book, book.id))?;

        let total_copies = book.total_copies.max(1);
        *existing = Book {
            total_copies,
            available_copies: book.available_copies.min(total_copies),
            ..book
        };
        let updated = existing.clone();
        self.save();

        tracing::info!("Updated book id={}", updated.id);
        Ok(updated)
    }

    pub fn edit_book(&mut self, id: i32, edit: BookEdit) -> AppResult<Book> {
        let mut book = self.find_book(id)?.clone();
        edit.apply_to(&mut book);
        self.update_book(book)
    }

    /// Remove a book together with every loan that references it,
    /// returned or not.
    pub fn delete_book(&mut self, id: i32) -> AppResult<Book> {
        let index = self
            .data
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| AppError::not_found(Entity::Book, id))?;

        let removed = self.data.books.remove(index);
        let before = self.data.loans.len();
        self.data.loans.retain(|l| l.book_id != id);
        let dropped = before - self.data.loans.len();
        self.save();

        tracing::info!("Deleted book id={} and {} loan record(s)", id, dropped);
        Ok(removed)
    }
}
