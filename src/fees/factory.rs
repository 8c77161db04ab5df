use std::sync::Arc;
use crate::core::domain::Configuration;
use crate::core::repository::Repositories;
use crate::fees::domain::FeeService;
use crate::fees::domain::service::FeeServiceImpl;

pub fn create_fee_service(config: &Configuration, repositories: &Repositories) -> Arc<dyn FeeService> {
    Arc::new(FeeServiceImpl::new(config, repositories.books.clone(), repositories.loans.clone()))
}
