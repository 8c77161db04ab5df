use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::ReturnReceipt;
use crate::core::command::{Command, CommandReply};

pub struct ReturnBookCommand {
    checkout_service: Arc<dyn CheckoutService>,
}

impl ReturnBookCommand {
    pub fn new(checkout_service: Arc<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReturnBookCommandRequest {
    patron_id: String,
    book_id: i64,
}

impl ReturnBookCommandRequest {
    pub fn new(patron_id: &str, book_id: i64) -> Self {
        Self {
            patron_id: patron_id.to_string(),
            book_id,
        }
    }
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnReceipt> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> CommandReply<ReturnReceipt> {
        match self.checkout_service.return_book(req.patron_id.as_str(), req.book_id).await {
            Ok(receipt) => {
                let message = receipt.message.clone();
                CommandReply::ok(message.as_str(), receipt)
            }
            Err(err) => CommandReply::from(err),
        }
    }
}
