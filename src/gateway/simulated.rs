use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;
use crate::core::domain::PATRON_ID_LEN;
use crate::gateway::payment::{PaymentGateway, PaymentOutcome, RefundOutcome};

const MAX_CHARGE: Decimal = dec!(1000);

// SimulatedPaymentGateway approves anything plausible, for demos and local runs.
#[derive(Debug, Default)]
pub struct SimulatedPaymentGateway {}

impl SimulatedPaymentGateway {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn process_payment(&self, patron_id: &str, amount: Decimal, description: &str) -> PaymentOutcome {
        if amount <= Decimal::ZERO {
            return PaymentOutcome::Declined { message: "Invalid amount: must be greater than 0".to_string() };
        }
        if amount > MAX_CHARGE {
            return PaymentOutcome::Declined { message: "Payment declined: amount exceeds limit".to_string() };
        }
        if patron_id.chars().count() != PATRON_ID_LEN {
            return PaymentOutcome::Declined { message: "Invalid patron ID format".to_string() };
        }
        let transaction_id = format!("txn_{}_{}", patron_id, Utc::now().timestamp());
        info!(patron_id, transaction_id = transaction_id.as_str(), description, "payment approved");
        PaymentOutcome::Approved {
            transaction_id,
            message: format!("Payment of ${:.2} processed successfully", amount),
        }
    }

    async fn refund_payment(&self, transaction_id: &str, amount: Decimal) -> RefundOutcome {
        if !transaction_id.starts_with("txn_") {
            return RefundOutcome::Declined { message: "Invalid transaction ID".to_string() };
        }
        if amount <= Decimal::ZERO {
            return RefundOutcome::Declined { message: "Invalid refund amount".to_string() };
        }
        let refund_id = format!("refund_{}_{}", transaction_id, Utc::now().timestamp());
        info!(transaction_id, refund_id = refund_id.as_str(), "refund approved");
        RefundOutcome::Approved {
            message: format!("Refund of ${:.2} processed successfully. Refund ID: {}", amount, refund_id),
        }
    }
}
