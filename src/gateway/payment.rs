use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

// PaymentOutcome is the gateway's answer to a charge. Declined means the processor refused it,
// Error means the processor could not be reached or failed internally.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub enum PaymentOutcome {
    Approved { transaction_id: String, message: String },
    Declined { message: String },
    Error { message: String },
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub enum RefundOutcome {
    Approved { message: String },
    Declined { message: String },
    Error { message: String },
}

// PaymentGateway abstracts the external card processor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Sync + Send {
    async fn process_payment(&self, patron_id: &str, amount: Decimal, description: &str) -> PaymentOutcome;
    async fn refund_payment(&self, transaction_id: &str, amount: Decimal) -> RefundOutcome;
}
