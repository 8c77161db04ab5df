use std::sync::Arc;
use aws_sdk_dynamodb::types::ScalarAttributeType;
use crate::checkout::domain::CheckoutService;
use crate::checkout::domain::service::CheckoutServiceImpl;
use crate::checkout::repository::LoanRepository;
use crate::checkout::repository::ddb_loan_repository::DDBLoanRepository;
use crate::checkout::repository::memory_loan_repository::MemoryLoanRepository;
use crate::core::domain::Configuration;
use crate::core::repository::{Repositories, RepositoryStore};
use crate::fees::factory::create_fee_service;
use crate::utils::ddb::{build_db_client, create_table, TableKeys};

pub async fn create_loan_repository(store: RepositoryStore) -> Arc<dyn LoanRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Arc::new(DDBLoanRepository::new(client, "loans", "loans_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "loans", TableKeys {
                pk: "loan_id", pk_type: ScalarAttributeType::S, gsi_pk: "patron_id", gsi_sk: Some("loan_status") }).await;
            Arc::new(DDBLoanRepository::new(client, "loans", "loans_ndx"))
        }
        RepositoryStore::InMemory => {
            Arc::new(MemoryLoanRepository::new())
        }
    }
}

pub fn create_checkout_service(config: &Configuration, repositories: &Repositories) -> Arc<dyn CheckoutService> {
    let fee_svc = create_fee_service(config, repositories);
    Arc::new(CheckoutServiceImpl::new(config, repositories.books.clone(),
                                      repositories.loans.clone(), fee_svc))
}
