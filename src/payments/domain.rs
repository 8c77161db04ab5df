pub mod service;

use async_trait::async_trait;
use rust_decimal::Decimal;
use crate::core::library::LibraryResult;
use crate::gateway::payment::PaymentGateway;
use crate::payments::dto::{PaymentReceipt, RefundReceipt};

// PaymentService charges and refunds late fees through a payment gateway. Passing None for the
// gateway uses the service's default one.
#[async_trait]
pub trait PaymentService: Sync + Send {
    async fn pay_late_fees(&self, patron_id: &str, book_id: i64,
                           gateway: Option<&dyn PaymentGateway>) -> LibraryResult<PaymentReceipt>;
    async fn refund_late_fee_payment(&self, transaction_id: &str, amount: Decimal,
                                     gateway: Option<&dyn PaymentGateway>) -> LibraryResult<RefundReceipt>;
}
