//! Request extractors that turn every rejection into an `AppError`.

mod validated_json;
mod validated_parts;

pub use validated_json::{JsonBody, ValidatedJson};
pub use validated_parts::{ValidatedPath, ValidatedQuery};
