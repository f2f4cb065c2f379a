//! Loan (issue) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Loan record. `return_date` is `None` while the copy is still out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: i32,
    pub book_id: i32,
    pub member_id: i32,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl Loan {
    pub fn is_returned(&self) -> bool {
        self.return_date.is_some()
    }

    /// Outstanding and past its due date on `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_returned() && self.due_date < today
    }
}

impl std::fmt::Display for Loan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Loan[{}] Book:{} Member:{} Issued:{} Due:{} Returned:",
            self.id, self.book_id, self.member_id, self.issue_date, self.due_date
        )?;
        match self.return_date {
            Some(date) => write!(f, "{}", date),
            None => write!(f, "-"),
        }
    }
}

/// Loan with book title and member name for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanDetails {
    pub loan: Loan,
    pub book_title: Option<String>,
    pub member_name: Option<String>,
    pub is_overdue: bool,
}

impl std::fmt::Display for LoanDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} -> {} | issued {} due {} | ",
            self.loan.id,
            self.book_title.as_deref().unwrap_or("N/A"),
            self.member_name.as_deref().unwrap_or("N/A"),
            self.loan.issue_date,
            self.loan.due_date,
        )?;
        match self.loan.return_date {
            Some(date) => write!(f, "returned {}", date),
            None if self.is_overdue => write!(f, "OVERDUE"),
            None => write!(f, "out"),
        }
    }
}
