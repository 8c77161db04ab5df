use std::fmt;
use std::fmt::{Display, Formatter};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use crate::core::domain::Configuration;

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum FeeStatus {
    Ok,
    InvalidPatronId,
    BookNotFound,
    NotBorrowed,
}

impl Display for FeeStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            FeeStatus::Ok => write!(f, "OK"),
            FeeStatus::InvalidPatronId => write!(f, "Invalid patron ID"),
            FeeStatus::BookNotFound => write!(f, "Book not found"),
            FeeStatus::NotBorrowed => write!(f, "Book not currently borrowed"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct FeeResult {
    pub fee_amount: Decimal,
    pub days_overdue: i64,
    pub status: FeeStatus,
}

impl FeeResult {
    pub fn new(fee_amount: Decimal, days_overdue: i64) -> Self {
        Self {
            fee_amount,
            days_overdue,
            status: FeeStatus::Ok,
        }
    }

    pub fn none(status: FeeStatus) -> Self {
        Self {
            fee_amount: Decimal::ZERO,
            days_overdue: 0,
            status,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == FeeStatus::Ok
    }
}

// late_fee applies the tiered daily rates to the overdue days and caps the total.
pub fn late_fee(config: &Configuration, days_overdue: i64) -> Decimal {
    let days = days_overdue.max(0);
    let first_tier = Decimal::from(days.min(config.first_tier_days)) * config.first_tier_daily_fee;
    let after_tier = Decimal::from((days - config.first_tier_days).max(0)) * config.daily_fee_after_tier;
    (first_tier + after_tier)
        .min(config.max_late_fee)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
