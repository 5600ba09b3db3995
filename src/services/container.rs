//! Service container - centralized service access.
//!
//! Builds every service over one set of repositories so the API layer
//! depends only on service traits.

use std::sync::Arc;

use super::{
    AppointmentManager, AppointmentService, AuthService, Authenticator, AvailabilityManager,
    AvailabilityService, CatalogManager, CatalogService, ReviewManager, ReviewService,
    UserManager, UserService,
};
use crate::config::Config;
use crate::infra::Repositories;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn catalog(&self) -> Arc<dyn CatalogService>;

    fn availability(&self) -> Arc<dyn AvailabilityService>;

    fn appointments(&self) -> Arc<dyn AppointmentService>;

    fn reviews(&self) -> Arc<dyn ReviewService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    catalog_service: Arc<dyn CatalogService>,
    availability_service: Arc<dyn AvailabilityService>,
    appointment_service: Arc<dyn AppointmentService>,
    review_service: Arc<dyn ReviewService>,
}

impl Services {
    /// Wire the default service implementations over the given repositories.
    pub fn from_repositories(repos: Repositories, config: Config) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(repos.users.clone(), config)),
            user_service: Arc::new(UserManager::new(repos.users)),
            catalog_service: Arc::new(CatalogManager::new(repos.salons, repos.services)),
            availability_service: Arc::new(AvailabilityManager::new(repos.availability)),
            appointment_service: Arc::new(AppointmentManager::new(repos.appointments)),
            review_service: Arc::new(ReviewManager::new(repos.reviews)),
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        Self::from_repositories(Repositories::postgres(db), config)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }

    fn availability(&self) -> Arc<dyn AvailabilityService> {
        self.availability_service.clone()
    }

    fn appointments(&self) -> Arc<dyn AppointmentService> {
        self.appointment_service.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewService> {
        self.review_service.clone()
    }
}
