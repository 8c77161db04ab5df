use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::CheckoutReceipt;
use crate::core::command::{Command, CommandReply};

pub struct CheckoutBookCommand {
    checkout_service: Arc<dyn CheckoutService>,
}

impl CheckoutBookCommand {
    pub fn new(checkout_service: Arc<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckoutBookCommandRequest {
    patron_id: String,
    book_id: i64,
}

impl CheckoutBookCommandRequest {
    pub fn new(patron_id: &str, book_id: i64) -> Self {
        Self {
            patron_id: patron_id.to_string(),
            book_id,
        }
    }
}

#[async_trait]
impl Command<CheckoutBookCommandRequest, CheckoutReceipt> for CheckoutBookCommand {
    async fn execute(&self, req: CheckoutBookCommandRequest) -> CommandReply<CheckoutReceipt> {
        match self.checkout_service.borrow_book(req.patron_id.as_str(), req.book_id).await {
            Ok(receipt) => {
                let message = receipt.message.clone();
                CommandReply::ok(message.as_str(), receipt)
            }
            Err(err) => CommandReply::from(err),
        }
    }
}
