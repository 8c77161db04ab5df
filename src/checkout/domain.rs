use async_trait::async_trait;
use crate::checkout::dto::{CheckoutReceipt, ReturnReceipt};
use crate::core::library::LibraryResult;

pub mod model;
pub mod service;

// CheckoutService moves a (patron, book) pair between no active loan and one active loan.
#[async_trait]
pub trait CheckoutService: Sync + Send {
    async fn borrow_book(&self, patron_id: &str, book_id: i64) -> LibraryResult<CheckoutReceipt>;
    async fn return_book(&self, patron_id: &str, book_id: i64) -> LibraryResult<ReturnReceipt>;
}
