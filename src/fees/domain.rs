use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::fees::domain::model::FeeResult;

pub mod model;
pub mod service;

// FeeService computes the late fee owed on one active loan without changing anything.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeeService: Sync + Send {
    async fn calculate_late_fee(&self, patron_id: &str, book_id: i64) -> LibraryResult<FeeResult>;
}
