//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AppointmentService, AuthService, AvailabilityService, CatalogService, ReviewService,
    ServiceContainer, Services, UserService,
};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub catalog_service: Arc<dyn CatalogService>,
    pub availability_service: Arc<dyn AvailabilityService>,
    pub appointment_service: Arc<dyn AppointmentService>,
    pub review_service: Arc<dyn ReviewService>,
    /// Present when running against a real database; used by `/health`
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state backed by the PostgreSQL repositories.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_services(&container, Some(database))
    }

    /// Create application state from any service container.
    pub fn from_services(services: &dyn ServiceContainer, database: Option<Arc<Database>>) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            catalog_service: services.catalog(),
            availability_service: services.availability(),
            appointment_service: services.appointments(),
            review_service: services.reviews(),
            database,
        }
    }
}
