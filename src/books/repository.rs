pub mod ddb_book_repository;
pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;

// BookRepository abstracts the books table. available_copies is only ever changed through
// update_availability, which refuses to leave the 0..=total_copies range.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Sync + Send {
    // inserts the book and returns the store-assigned book_id
    async fn create(&self, entity: &BookEntity) -> LibraryResult<i64>;
    async fn get(&self, book_id: i64) -> LibraryResult<Option<BookEntity>>;
    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>>;
    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>>;
    async fn update_availability(&self, book_id: i64, delta: i64) -> LibraryResult<usize>;
}
