use std::sync::Arc;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::repository::Repositories;

pub fn create_catalog_service(config: &Configuration, repositories: &Repositories) -> Arc<dyn CatalogService> {
    Arc::new(CatalogServiceImpl::new(config, repositories.books.clone()))
}
