//! HTTP request handlers.

pub mod appointment_handler;
pub mod auth_handler;
pub mod availability_handler;
pub mod review_handler;
pub mod salon_handler;
pub mod user_handler;

pub use appointment_handler::appointment_routes;
pub use auth_handler::auth_routes;
pub use availability_handler::availability_routes;
pub use review_handler::review_routes;
pub use salon_handler::salon_routes;
pub use user_handler::user_routes;
