use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::services::CatalogueServices;

/// Shared application state available to all request handlers via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
    pub services: CatalogueServices,
}

impl AppState {
    #[must_use]
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let services = CatalogueServices::new(&db);
        Self {
            db,
            config,
            services,
        }
    }
}
