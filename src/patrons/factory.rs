use std::sync::Arc;
use crate::core::domain::Configuration;
use crate::core::repository::Repositories;
use crate::patrons::domain::PatronService;
use crate::patrons::domain::service::PatronServiceImpl;

pub fn create_patron_service(config: &Configuration, repositories: &Repositories) -> Arc<dyn PatronService> {
    Arc::new(PatronServiceImpl::new(config, repositories.books.clone(), repositories.loans.clone()))
}
