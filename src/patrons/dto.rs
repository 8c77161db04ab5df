use serde::{Deserialize, Serialize};
use crate::checkout::dto::BorrowedBookDto;
use crate::utils::date::{format_timestamp, whole_days_overdue};
use chrono::NaiveDateTime;

pub const REPORT_OK: &str = "OK";

// ReportedLoan is one borrowed book as shown on the patron report, dates as ISO timestamps.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ReportedLoan {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub borrowed_at: String,
    pub due_at: String,
    pub is_overdue: bool,
    pub days_overdue: i64,
}

impl ReportedLoan {
    pub fn from_borrowed(borrowed: &BorrowedBookDto, now: NaiveDateTime) -> Self {
        Self {
            book_id: borrowed.book_id,
            title: borrowed.title.to_string(),
            author: borrowed.author.to_string(),
            borrowed_at: format_timestamp(borrowed.borrowed_at),
            due_at: format_timestamp(borrowed.due_at),
            is_overdue: borrowed.is_overdue,
            days_overdue: if borrowed.is_overdue { whole_days_overdue(now, borrowed.due_at) } else { 0 },
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PatronReport {
    pub patron_id: String,
    pub borrowed_count: usize,
    pub remaining_allowance: usize,
    pub overdue_count: usize,
    pub next_due_date: Option<String>,
    pub borrowed_books: Vec<ReportedLoan>,
    pub status: String,
}

impl PatronReport {
    pub fn empty(patron_id: &str, max_borrowed_books: usize, status: &str) -> Self {
        Self {
            patron_id: patron_id.to_string(),
            borrowed_count: 0,
            remaining_allowance: max_borrowed_books,
            overdue_count: 0,
            next_due_date: None,
            borrowed_books: vec![],
            status: status.to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == REPORT_OK
    }
}
