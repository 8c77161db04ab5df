use chrono::{Duration, Utc};
use tracing::info;
use crate::books::domain::model::BookEntity;
use crate::checkout::domain::model::LoanEntity;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::Repositories;

const SAMPLE_BOOKS: [(&str, &str, &str, i64); 3] = [
    ("The Great Gatsby", "F. Scott Fitzgerald", "9780743273565", 3),
    ("To Kill a Mockingbird", "Harper Lee", "9780061120084", 2),
    ("1984", "George Orwell", "9780451524935", 1),
];

const SAMPLE_PATRON: &str = "123456";

// seed_sample_data loads a small demo catalog into an empty store, with the single copy of 1984
// on loan to the sample patron. Returns the number of books added.
pub async fn seed_sample_data(config: &Configuration, repositories: &Repositories) -> LibraryResult<usize> {
    if !repositories.books.find_all().await?.is_empty() {
        return Ok(0);
    }
    let mut last_book_id = 0;
    for (title, author, isbn, copies) in SAMPLE_BOOKS {
        last_book_id = repositories.books.create(&BookEntity::new(title, author, isbn, copies)).await?;
    }
    let borrowed_at = Utc::now().naive_utc() - Duration::days(5);
    repositories.loans.create(&LoanEntity::new(SAMPLE_PATRON, last_book_id, borrowed_at, config.book_loan_days)).await?;
    repositories.books.update_availability(last_book_id, -1).await?;
    info!(books = SAMPLE_BOOKS.len(), "sample data loaded");
    Ok(SAMPLE_BOOKS.len())
}
