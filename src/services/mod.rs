//! Application services layer - Use cases and business logic.
//!
//! Services depend on repository traits, never on SeaORM directly, and
//! are exposed to the API layer as trait objects.

mod appointment_service;
mod auth_service;
mod availability_service;
mod catalog_service;
pub mod container;
mod review_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use appointment_service::{AppointmentManager, AppointmentService};
pub use auth_service::{AuthService, Authenticator, Claims, Registration, TokenResponse};
pub use availability_service::{AvailabilityManager, AvailabilityService};
pub use catalog_service::{CatalogManager, CatalogService};
pub use review_service::{ReviewManager, ReviewService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
