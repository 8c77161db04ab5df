use std::sync::Arc;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use crate::core::command::{Command, CommandReply};
use crate::payments::domain::PaymentService;
use crate::payments::dto::RefundReceipt;

pub struct RefundLateFeeCommand {
    payment_service: Arc<dyn PaymentService>,
}

impl RefundLateFeeCommand {
    pub fn new(payment_service: Arc<dyn PaymentService>) -> Self {
        Self {
            payment_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RefundLateFeeCommandRequest {
    transaction_id: String,
    amount: Decimal,
}

impl RefundLateFeeCommandRequest {
    pub fn new(transaction_id: &str, amount: Decimal) -> Self {
        Self {
            transaction_id: transaction_id.to_string(),
            amount,
        }
    }
}

#[async_trait]
impl Command<RefundLateFeeCommandRequest, RefundReceipt> for RefundLateFeeCommand {
    async fn execute(&self, req: RefundLateFeeCommandRequest) -> CommandReply<RefundReceipt> {
        match self.payment_service.refund_late_fee_payment(req.transaction_id.as_str(), req.amount, None).await {
            Ok(receipt) => {
                let message = receipt.message.clone();
                CommandReply::ok(message.as_str(), receipt)
            }
            Err(err) => CommandReply::from(err),
        }
    }
}
