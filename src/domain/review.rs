//! Salon reviews.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Review {
    #[serde(default)]
    #[schema(example = 1)]
    pub review_id: i32,
    #[schema(example = 3)]
    pub user_id: i32,
    #[schema(example = 5)]
    pub salon_id: i32,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rating: i32,
    #[serde(default)]
    #[schema(example = "Great cut, friendly staff")]
    pub comment: String,
    /// RFC3339 timestamp; filled with the current time when blank
    #[serde(default)]
    #[schema(example = "2023-07-10T12:00:00Z")]
    pub date_posted: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: i32) -> Review {
        Review {
            review_id: 0,
            user_id: 1,
            salon_id: 1,
            rating,
            comment: String::new(),
            date_posted: String::new(),
        }
    }

    #[test]
    fn test_rating_bounds() {
        assert!(review(1).validate().is_ok());
        assert!(review(5).validate().is_ok());
        assert!(review(0).validate().is_err());
        assert!(review(6).validate().is_err());
    }
}
