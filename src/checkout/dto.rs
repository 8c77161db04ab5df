use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::model::LoanEntity;
use crate::core::library::LoanStatus;
use crate::utils::date::{opt_serializer, serializer};

// LoanDto abstracts the book that is checked out or borrowed.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LoanDto {
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
}

impl From<&LoanEntity> for LoanDto {
    fn from(other: &LoanEntity) -> LoanDto {
        LoanDto {
            loan_id: other.loan_id.to_string(),
            version: other.version,
            patron_id: other.patron_id.to_string(),
            book_id: other.book_id,
            loan_status: other.loan_status,
            borrowed_at: other.borrowed_at,
            due_at: other.due_at,
            returned_at: other.returned_at,
        }
    }
}

// BorrowedBookDto is an active loan joined with its book.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BorrowedBookDto {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    #[serde(with = "serializer")]
    pub borrowed_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_at: NaiveDateTime,
    pub is_overdue: bool,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct CheckoutReceipt {
    pub loan: LoanDto,
    pub title: String,
    pub message: String,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ReturnReceipt {
    pub loan: LoanDto,
    pub title: String,
    pub days_overdue: i64,
    pub fee_amount: Decimal,
    pub message: String,
}
