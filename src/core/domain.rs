use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub const PATRON_ID_LEN: usize = 6;

// Configuration abstracts config options for library system
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub max_borrowed_books: usize,
    pub book_loan_days: i64,
    // catalog field limits, counted in characters
    pub max_title_len: usize,
    pub max_author_len: usize,
    // late fee schedule: first tier per-day rate, then the rate after the tier, capped per book
    pub first_tier_days: i64,
    pub first_tier_daily_fee: Decimal,
    pub daily_fee_after_tier: Decimal,
    pub max_late_fee: Decimal,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            max_borrowed_books: 5,
            book_loan_days: 14,
            max_title_len: 200,
            max_author_len: 100,
            first_tier_days: 7,
            first_tier_daily_fee: dec!(0.50),
            daily_fee_after_tier: dec!(1.00),
            max_late_fee: dec!(15.00),
        }
    }
}

// library card numbers are exactly six ASCII digits
pub fn is_valid_patron_id(patron_id: &str) -> bool {
    patron_id.len() == PATRON_ID_LEN && patron_id.chars().all(|c| c.is_ascii_digit())
}
