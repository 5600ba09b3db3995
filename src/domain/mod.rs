//! Domain layer - Core business entities and logic
//!
//! Entities here are independent of storage and transport. Status enums
//! carry the allowed transitions; services enforce them.

pub mod appointment;
pub mod availability;
pub mod password;
pub mod review;
pub mod salon;
pub mod user;

pub use appointment::{Appointment, AppointmentStatus};
pub use availability::{Availability, AvailabilityStatus};
pub use password::Password;
pub use review::Review;
pub use salon::{AverageRating, Salon, SalonCreated, Service, ServiceCreated};
pub use user::{NewUser, User, UserProfile};
