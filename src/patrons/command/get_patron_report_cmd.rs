use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::core::command::{Command, CommandReply};
use crate::patrons::domain::PatronService;
use crate::patrons::dto::PatronReport;

pub struct GetPatronReportCommand {
    patron_service: Arc<dyn PatronService>,
}

impl GetPatronReportCommand {
    pub fn new(patron_service: Arc<dyn PatronService>) -> Self {
        Self {
            patron_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GetPatronReportCommandRequest {
    pub patron_id: String,
}

impl GetPatronReportCommandRequest {
    pub fn new(patron_id: &str) -> Self {
        Self {
            patron_id: patron_id.to_string(),
        }
    }
}

#[async_trait]
impl Command<GetPatronReportCommandRequest, PatronReport> for GetPatronReportCommand {
    // the report is returned even when the patron id is rejected
    async fn execute(&self, req: GetPatronReportCommandRequest) -> CommandReply<PatronReport> {
        match self.patron_service.status_report(req.patron_id.as_str()).await {
            Ok(report) => CommandReply {
                success: report.is_ok(),
                message: report.status.to_string(),
                data: Some(report),
            },
            Err(err) => CommandReply::from(err),
        }
    }
}
