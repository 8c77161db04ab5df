use std::sync::Arc;
use serde::{Deserialize, Serialize};
use crate::books::factory::create_book_repository;
use crate::books::repository::BookRepository;
use crate::checkout::factory::create_loan_repository;
use crate::checkout::repository::LoanRepository;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    InMemory,
}

// Repositories holds the store handles shared by every service of one library instance.
#[derive(Clone)]
pub struct Repositories {
    pub books: Arc<dyn BookRepository>,
    pub loans: Arc<dyn LoanRepository>,
}

impl Repositories {
    pub fn new(books: Arc<dyn BookRepository>, loans: Arc<dyn LoanRepository>) -> Self {
        Self {
            books,
            loans,
        }
    }

    pub async fn create(store: RepositoryStore) -> Self {
        Self::new(create_book_repository(store).await,
                  create_loan_repository(store).await)
    }
}
