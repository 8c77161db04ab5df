use std::sync::Arc;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use crate::books::repository::BookRepository;
use crate::checkout::repository::{find_active_loan, LoanRepository};
use crate::core::domain::{is_valid_patron_id, Configuration};
use crate::core::library::LibraryResult;
use crate::fees::domain::FeeService;
use crate::fees::domain::model::{late_fee, FeeResult, FeeStatus};
use crate::utils::date::calendar_days_overdue;

pub(crate) struct FeeServiceImpl {
    config: Configuration,
    book_repository: Arc<dyn BookRepository>,
    loan_repository: Arc<dyn LoanRepository>,
}

impl FeeServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Arc<dyn BookRepository>,
                      loan_repository: Arc<dyn LoanRepository>) -> Self {
        Self {
            config: config.clone(),
            book_repository,
            loan_repository,
        }
    }

    async fn calculate_late_fee_at(&self, patron_id: &str, book_id: i64, now: NaiveDateTime) -> LibraryResult<FeeResult> {
        if !is_valid_patron_id(patron_id) {
            return Ok(FeeResult::none(FeeStatus::InvalidPatronId));
        }
        if self.book_repository.get(book_id).await?.is_none() {
            return Ok(FeeResult::none(FeeStatus::BookNotFound));
        }
        let loan = match find_active_loan(self.loan_repository.as_ref(), patron_id, book_id).await? {
            Some(loan) => loan,
            None => return Ok(FeeResult::none(FeeStatus::NotBorrowed)),
        };
        let days_overdue = calendar_days_overdue(now, loan.due_at);
        Ok(FeeResult::new(late_fee(&self.config, days_overdue), days_overdue))
    }
}

#[async_trait]
impl FeeService for FeeServiceImpl {
    async fn calculate_late_fee(&self, patron_id: &str, book_id: i64) -> LibraryResult<FeeResult> {
        self.calculate_late_fee_at(patron_id, book_id, Utc::now().naive_utc()).await
    }
}
