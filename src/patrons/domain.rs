pub mod service;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::patrons::dto::PatronReport;

// PatronService reports on the loans a patron currently holds.
#[async_trait]
pub trait PatronService: Sync + Send {
    async fn status_report(&self, patron_id: &str) -> LibraryResult<PatronReport>;
}
