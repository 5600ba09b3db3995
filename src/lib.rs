//! BookMySalon - REST backend for salon discovery and booking.
//!
//! Customers register, browse salons and the services they offer, book
//! open availability slots, manage appointments and leave reviews.
//!
//! # Layers
//!
//! - **api**: HTTP handlers, extractors, JWT middleware and routes
//! - **services**: use cases and the slot/appointment state machines
//! - **infra**: PostgreSQL access through SeaORM, plus migrations
//! - **domain**: entities shared by every layer
//! - **config**, **errors**, **types**: cross-cutting pieces
//!
//! # CLI Usage
//!
//! ```bash
//! bookmysalon serve --port 8080
//! bookmysalon migrate status
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

pub use api::{create_router, AppState};
pub use config::Config;
pub use errors::{AppError, AppResult};
