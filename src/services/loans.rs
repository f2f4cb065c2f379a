//! Loan management: issuing and returning copies

use chrono::NaiveDate;

use super::{next_id, CatalogService};
use crate::{
    error::{AppError, AppResult, Entity},
    models::{Loan, LoanDetails},
};

impl CatalogService {
    pub fn loans(&self) -> &[Loan] {
        &self.data.loans
    }

    pub fn find_loan(&self, id: i32) -> AppResult<&Loan> {
        self.data
            .loans
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| AppError::not_found(Entity::Loan, id))
    }

    /// Loans not yet returned
    pub fn active_loans(&self) -> Vec<&Loan> {
        self.data.loans.iter().filter(|l| !l.is_returned()).collect()
    }

    pub fn member_loans(&self, member_id: i32) -> Vec<&Loan> {
        self.data
            .loans
            .iter()
            .filter(|l| l.member_id == member_id)
            .collect()
    }

    pub fn overdue_loans(&self, today: NaiveDate) -> Vec<&Loan> {
        self.data.loans.iter().filter(|l| l.is_overdue(today)).collect()
    }

    /// Every loan joined with its book title and member name
    pub fn loan_details(&self, today: NaiveDate) -> Vec<LoanDetails> {
        self.data.loans.iter().map(|l| self.details_for(l, today)).collect()
    }

    pub fn active_loan_details(&self, today: NaiveDate) -> Vec<LoanDetails> {
        self.active_loans()
            .into_iter()
            .map(|l| self.details_for(l, today))
            .collect()
    }

    fn details_for(&self, loan: &Loan, today: NaiveDate) -> LoanDetails {
        LoanDetails {
            loan: loan.clone(),
            book_title: self.find_book(loan.book_id).ok().map(|b| b.title.clone()),
            member_name: self.find_member(loan.member_id).ok().map(|m| m.name.clone()),
            is_overdue: loan.is_overdue(today),
        }
    }

    /// Lend one copy of a book.
    ///
    /// Fails without touching any state when the book or member is unknown,
    /// the due date precedes the issue date, or no copy is available.
    pub fn issue_book(
        &mut self,
        book_id: i32,
        member_id: i32,
        issue_date: NaiveDate,
        due_date: NaiveDate,
    ) -> AppResult<Loan> {
        let book_index = self
            .data
            .books
            .iter()
            .position(|b| b.id == book_id)
            .ok_or_else(|| AppError::not_found(Entity::Book, book_id))?;
        self.find_member(member_id)?;

        if due_date < issue_date {
            return Err(AppError::Validation(format!(
                "Due date {} is before issue date {}",
                due_date, issue_date
            )));
        }

        let id = next_id(Entity::Loan, &self.data.loans, |l| l.id)?;
        let book = &mut self.data.books[book_index];
        if !book.issue_one() {
            tracing::warn!("Issue refused: no copies of book id={} available", book_id);
            return Err(AppError::NoCopiesAvailable {
                book_id,
                title: book.title.clone(),
            });
        }

        let loan = Loan {
            id,
            book_id,
            member_id,
            issue_date,
            due_date,
            return_date: None,
        };
        self.data.loans.push(loan.clone());
        self.save();

        tracing::info!(
            "Issued loan id={} book={} member={} due {}",
            loan.id,
            book_id,
            member_id,
            due_date
        );
        Ok(loan)
    }

    /// Close a loan. The copy goes back to its book when the book still
    /// exists, never beyond its total.
    pub fn return_book(&mut self, loan_id: i32, return_date: NaiveDate) -> AppResult<Loan> {
        let loan = self
            .data
            .loans
            .iter_mut()
            .find(|l| l.id == loan_id)
            .ok_or_else(|| AppError::not_found(Entity::Loan, loan_id))?;

        if let Some(returned_on) = loan.return_date {
            tracing::warn!("Return refused: loan id={} already closed", loan_id);
            return Err(AppError::AlreadyReturned {
                loan_id,
                returned_on,
            });
        }

        loan.return_date = Some(return_date);
        let loan = loan.clone();

        match self.data.books.iter_mut().find(|b| b.id == loan.book_id) {
            Some(book) => book.return_one(),
            None => tracing::debug!("Book id={} of loan id={} no longer exists", loan.book_id, loan_id),
        }
        self.save();

        tracing::info!("Returned loan id={} on {}", loan_id, return_date);
        Ok(loan)
    }
}
