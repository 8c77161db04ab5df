use std::sync::Arc;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use crate::books::repository::BookRepository;
use crate::checkout::repository::{find_borrowed_books, LoanRepository};
use crate::core::domain::{is_valid_patron_id, Configuration};
use crate::core::library::LibraryResult;
use crate::patrons::domain::PatronService;
use crate::patrons::dto::{PatronReport, ReportedLoan, REPORT_OK};
use crate::utils::date::format_timestamp;

pub(crate) struct PatronServiceImpl {
    max_borrowed_books: usize,
    book_repository: Arc<dyn BookRepository>,
    loan_repository: Arc<dyn LoanRepository>,
}

impl PatronServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Arc<dyn BookRepository>,
                      loan_repository: Arc<dyn LoanRepository>) -> Self {
        PatronServiceImpl {
            max_borrowed_books: config.max_borrowed_books,
            book_repository,
            loan_repository,
        }
    }

    async fn status_report_at(&self, patron_id: &str, now: NaiveDateTime) -> LibraryResult<PatronReport> {
        if !is_valid_patron_id(patron_id) {
            return Ok(PatronReport::empty(patron_id, self.max_borrowed_books,
                                          "Invalid patron ID. Must be exactly 6 digits."));
        }
        let borrowed = find_borrowed_books(self.book_repository.as_ref(), self.loan_repository.as_ref(),
                                           patron_id, now).await?;
        let borrowed_count = self.loan_repository.count_active(patron_id).await?;
        let next_due_date = borrowed.iter().map(|b| b.due_at).min().map(format_timestamp);
        let borrowed_books: Vec<ReportedLoan> = borrowed.iter().map(|b| ReportedLoan::from_borrowed(b, now)).collect();
        Ok(PatronReport {
            patron_id: patron_id.to_string(),
            borrowed_count,
            remaining_allowance: self.max_borrowed_books.saturating_sub(borrowed_count),
            overdue_count: borrowed_books.iter().filter(|b| b.is_overdue).count(),
            next_due_date,
            borrowed_books,
            status: REPORT_OK.to_string(),
        })
    }
}

#[async_trait]
impl PatronService for PatronServiceImpl {
    async fn status_report(&self, patron_id: &str) -> LibraryResult<PatronReport> {
        self.status_report_at(patron_id, Utc::now().naive_utc()).await
    }
}
