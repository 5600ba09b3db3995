//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Status columns are plain text; conversion back to the domain enums
//! happens in `TryFrom`.

pub mod appointment;
pub mod availability;
pub mod review;
pub mod salon;
pub mod service;
pub mod user;
