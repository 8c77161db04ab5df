use std::sync::Arc;
use crate::core::domain::Configuration;
use crate::core::repository::Repositories;
use crate::fees::factory::create_fee_service;
use crate::gateway::factory::create_payment_gateway;
use crate::payments::domain::PaymentService;
use crate::payments::domain::service::PaymentServiceImpl;

pub fn create_payment_service(config: &Configuration, repositories: &Repositories) -> Arc<dyn PaymentService> {
    let fee_svc = create_fee_service(config, repositories);
    Arc::new(PaymentServiceImpl::new(config, repositories.books.clone(), fee_svc, create_payment_gateway()))
}
