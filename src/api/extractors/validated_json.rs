//! JSON body extractors.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::errors::AppError;

/// JSON body whose rejection (bad syntax, wrong shape, missing content type)
/// becomes a 400 in the standard error envelope.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(AppError::validation(rejection.body_text())),
        }
    }
}

/// [`JsonBody`] plus the `validator` rules declared on `T`.
///
/// ```rust,ignore
/// async fn create_review(ValidatedJson(review): ValidatedJson<Review>) {
///     // review.rating is already within 1..=5
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;

        if let Err(errors) = value.validate() {
            return Err(AppError::validation(describe(&errors)));
        }

        Ok(ValidatedJson(value))
    }
}

/// One message per failed rule, sorted so responses are stable.
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, failures)| {
            failures.iter().map(move |failure| match &failure.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();

    messages.sort();
    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Review;

    #[test]
    fn test_describe_uses_declared_message() {
        let review = Review {
            review_id: 0,
            user_id: 1,
            salon_id: 1,
            rating: 9,
            comment: String::new(),
            date_posted: String::new(),
        };

        let errors = review.validate().unwrap_err();
        assert_eq!(describe(&errors), "Rating must be between 1 and 5");
    }
}
