//! Repository layer - Data access abstraction
//!
//! Each aggregate has a repository trait (mockable in tests) and a
//! `*Store` implementation over a SeaORM connection.

mod appointment_repository;
mod availability_repository;
pub(crate) mod entities;
mod review_repository;
mod salon_repository;
mod service_repository;
mod user_repository;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use appointment_repository::{AppointmentRepository, AppointmentStore};
pub use availability_repository::{AvailabilityRepository, AvailabilityStore};
pub use review_repository::{ReviewRepository, ReviewStore};
pub use salon_repository::{SalonRepository, SalonStore};
pub use service_repository::{ServiceRepository, ServiceStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use appointment_repository::MockAppointmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use availability_repository::MockAvailabilityRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use review_repository::MockReviewRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use salon_repository::MockSalonRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use service_repository::MockServiceRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// One handle per repository, shared by the services.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub salons: Arc<dyn SalonRepository>,
    pub services: Arc<dyn ServiceRepository>,
    pub availability: Arc<dyn AvailabilityRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
}

impl Repositories {
    /// Build the SeaORM-backed repositories over one connection pool.
    pub fn postgres(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            salons: Arc::new(SalonStore::new(db.clone())),
            services: Arc::new(ServiceStore::new(db.clone())),
            availability: Arc::new(AvailabilityStore::new(db.clone())),
            appointments: Arc::new(AppointmentStore::new(db.clone())),
            reviews: Arc::new(ReviewStore::new(db)),
        }
    }
}
