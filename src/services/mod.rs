//! Business logic services

pub mod audible;
pub mod catalog;
pub mod import;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub import: import::ImportService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        let catalog = catalog::CatalogService::new(repository);
        Self {
            import: import::ImportService::new(catalog.clone()),
            catalog,
        }
    }
}
