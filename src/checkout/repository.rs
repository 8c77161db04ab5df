pub mod ddb_loan_repository;
pub mod memory_loan_repository;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::books::repository::BookRepository;
use crate::checkout::domain::model::LoanEntity;
use crate::checkout::dto::BorrowedBookDto;
use crate::core::library::LibraryResult;

// LoanRepository abstracts borrow records. A patron is expected to hold at most one active
// loan per book.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanRepository: Sync + Send {
    async fn create(&self, entity: &LoanEntity) -> LibraryResult<usize>;
    async fn delete(&self, loan_id: &str) -> LibraryResult<usize>;
    async fn count_active(&self, patron_id: &str) -> LibraryResult<usize>;
    async fn find_active(&self, patron_id: &str) -> LibraryResult<Vec<LoanEntity>>;
    // marks the active loan for (patron, book) as returned, None when there is none
    async fn close(&self, patron_id: &str, book_id: i64, returned_at: NaiveDateTime) -> LibraryResult<Option<LoanEntity>>;
    async fn reopen(&self, loan_id: &str) -> LibraryResult<usize>;
}

// find_active_loan returns the active loan of the patron for the book, if any.
pub async fn find_active_loan(loans: &dyn LoanRepository, patron_id: &str, book_id: i64) -> LibraryResult<Option<LoanEntity>> {
    Ok(loans.find_active(patron_id).await?.into_iter().find(|l| l.book_id == book_id))
}

// find_borrowed_books joins the active loans of the patron with their books, ordered by due date.
// Loans whose book is gone from the catalog are skipped. A loan is overdue once its due date,
// not its due time, is before today.
pub async fn find_borrowed_books(books: &dyn BookRepository, loans: &dyn LoanRepository,
                                 patron_id: &str, now: NaiveDateTime) -> LibraryResult<Vec<BorrowedBookDto>> {
    let mut active = loans.find_active(patron_id).await?;
    active.sort_by(|a, b| a.due_at.cmp(&b.due_at));
    let mut borrowed = vec![];
    for loan in active {
        if let Some(book) = books.get(loan.book_id).await? {
            borrowed.push(BorrowedBookDto {
                book_id: book.book_id,
                title: book.title,
                author: book.author,
                borrowed_at: loan.borrowed_at,
                due_at: loan.due_at,
                is_overdue: loan.due_at.date() < now.date(),
            });
        }
    }
    Ok(borrowed)
}
