use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::core::command::{Command, CommandReply};
use crate::payments::domain::PaymentService;
use crate::payments::dto::PaymentReceipt;

pub struct PayLateFeesCommand {
    payment_service: Arc<dyn PaymentService>,
}

impl PayLateFeesCommand {
    pub fn new(payment_service: Arc<dyn PaymentService>) -> Self {
        Self {
            payment_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PayLateFeesCommandRequest {
    patron_id: String,
    book_id: i64,
}

impl PayLateFeesCommandRequest {
    pub fn new(patron_id: &str, book_id: i64) -> Self {
        Self {
            patron_id: patron_id.to_string(),
            book_id,
        }
    }
}

#[async_trait]
impl Command<PayLateFeesCommandRequest, PaymentReceipt> for PayLateFeesCommand {
    async fn execute(&self, req: PayLateFeesCommandRequest) -> CommandReply<PaymentReceipt> {
        match self.payment_service.pay_late_fees(req.patron_id.as_str(), req.book_id, None).await {
            Ok(receipt) => {
                let message = receipt.message.clone();
                CommandReply::ok(message.as_str(), receipt)
            }
            Err(err) => CommandReply::from(err),
        }
    }
}
