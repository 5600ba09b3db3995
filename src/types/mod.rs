//! Shared request and response types.

mod range;
mod response;

pub use range::DateRangeQuery;
pub use response::{MessageResponse, NoContent};
