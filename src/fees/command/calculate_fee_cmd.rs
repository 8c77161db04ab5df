use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::core::command::{Command, CommandReply};
use crate::fees::domain::FeeService;
use crate::fees::domain::model::FeeResult;

pub struct CalculateLateFeeCommand {
    fee_service: Arc<dyn FeeService>,
}

impl CalculateLateFeeCommand {
    pub fn new(fee_service: Arc<dyn FeeService>) -> Self {
        Self {
            fee_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CalculateLateFeeCommandRequest {
    patron_id: String,
    book_id: i64,
}

impl CalculateLateFeeCommandRequest {
    pub fn new(patron_id: &str, book_id: i64) -> Self {
        Self {
            patron_id: patron_id.to_string(),
            book_id,
        }
    }
}

#[async_trait]
impl Command<CalculateLateFeeCommandRequest, FeeResult> for CalculateLateFeeCommand {
    async fn execute(&self, req: CalculateLateFeeCommandRequest) -> CommandReply<FeeResult> {
        match self.fee_service.calculate_late_fee(req.patron_id.as_str(), req.book_id).await {
            Ok(fee) => {
                // a fee status other than OK still carries the zero fee
                CommandReply {
                    success: fee.is_ok(),
                    message: fee.status.to_string(),
                    data: Some(fee),
                }
            }
            Err(_) => CommandReply::failed("Unable to calculate late fees."),
        }
    }
}
