use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::library::LoanStatus;
use crate::utils::date::{opt_serializer, serializer};

// LoanEntity abstracts one borrow record of a book by a patron.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LoanEntity {
    pub loan_id: String,
    pub version: i64,
    pub patron_id: String,
    pub book_id: i64,
    pub loan_status: LoanStatus,
    #[serde(with = "serializer")]
    pub borrowed_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_at: NaiveDateTime,
    #[serde(with = "opt_serializer")]
    pub returned_at: Option<NaiveDateTime>,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl LoanEntity {
    pub fn new(patron_id: &str, book_id: i64, borrowed_at: NaiveDateTime, loan_days: i64) -> Self {
        Self {
            loan_id: Uuid::new_v4().to_string(),
            version: 0,
            patron_id: patron_id.to_string(),
            book_id,
            loan_status: LoanStatus::Active,
            borrowed_at,
            due_at: borrowed_at + Duration::days(loan_days),
            returned_at: None,
            updated_at: borrowed_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.loan_status == LoanStatus::Active
    }
}
