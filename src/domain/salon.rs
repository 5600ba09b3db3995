//! Salon catalog entities: salons and the services they offer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A salon listing. `average_rating` is stored as given by the caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct Salon {
    /// Server-assigned id; 0 when not set
    #[serde(default)]
    #[schema(example = 1)]
    pub salon_id: i32,
    #[validate(length(min = 1, message = "Salon name is required"))]
    #[schema(example = "Downtown Cuts")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "12 Main Street")]
    pub address: String,
    #[serde(default)]
    #[schema(example = "+1 555 0100")]
    pub contact_details: String,
    #[serde(default)]
    #[schema(example = "https://cdn.example.com/salon/1.jpg")]
    pub photos: String,
    #[serde(default)]
    #[schema(example = 4.5)]
    pub average_rating: f64,
}

/// A treatment offered by one salon
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct Service {
    #[serde(default)]
    #[schema(example = 12)]
    pub service_id: i32,
    #[schema(example = 1)]
    pub salon_id: i32,
    #[validate(length(min = 1, message = "Service name is required"))]
    #[schema(example = "Haircut")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Free text, e.g. "45 minutes"
    #[serde(default)]
    #[schema(example = "45 minutes")]
    pub duration: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    #[serde(default)]
    #[schema(example = 30.0)]
    pub price: f64,
}

/// Body returned by `POST /salon`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SalonCreated {
    pub salon_id: i32,
}

/// Body returned by `POST /service`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceCreated {
    pub service_id: i32,
}

/// Body returned by `GET /salon/{id}/average-rating`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AverageRating {
    pub average_rating: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salon_id_defaults_to_unset() {
        let salon: Salon = serde_json::from_str(r#"{"name": "Downtown Cuts"}"#).unwrap();
        assert_eq!(salon.salon_id, 0);
        assert_eq!(salon.average_rating, 0.0);
    }

    #[test]
    fn test_empty_salon_name_is_invalid() {
        let salon = Salon::default();
        assert!(salon.validate().is_err());
    }

    #[test]
    fn test_negative_price_is_invalid() {
        let service = Service {
            salon_id: 1,
            name: "Haircut".to_string(),
            price: -1.0,
            ..Default::default()
        };
        assert!(service.validate().is_err());
    }
}
