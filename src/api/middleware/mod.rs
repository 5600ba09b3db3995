//! API middleware.

mod auth;

pub use auth::{auth_middleware, CurrentUser};
