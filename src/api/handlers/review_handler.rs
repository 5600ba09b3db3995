//! Review handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::api::extractors::{ValidatedJson, ValidatedPath};
use crate::api::AppState;
use crate::domain::Review;
use crate::errors::AppResult;
use crate::types::NoContent;

pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", post(create_review))
        .route(
            "/reviews/:review_id",
            get(get_review).put(update_review).delete(delete_review),
        )
        .route("/reviews/salon/:salon_id", get(list_by_salon))
        .route("/reviews/user/:user_id", get(list_by_user))
        .route("/reviews/rating/:rating", get(list_by_rating))
}

#[utoipa::path(
    post,
    path = "/reviews",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    request_body = Review,
    responses(
        (status = 201, description = "Review posted", body = Review),
        (status = 400, description = "Rating outside 1..=5 or invalid body")
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    ValidatedJson(review): ValidatedJson<Review>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let created = state.review_service.create(review).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/reviews/{review_id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("review_id" = i32, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review", body = Review),
        (status = 404, description = "review not found")
    )
)]
pub async fn get_review(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<Json<Review>> {
    Ok(Json(state.review_service.get(id).await?))
}

/// The path id replaces any id in the body.
#[utoipa::path(
    put,
    path = "/reviews/{review_id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("review_id" = i32, Path, description = "Review id")),
    request_body = Review,
    responses(
        (status = 200, description = "Review updated", body = Review),
        (status = 404, description = "review not found")
    )
)]
pub async fn update_review(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(mut review): ValidatedJson<Review>,
) -> AppResult<Json<Review>> {
    review.review_id = id;
    Ok(Json(state.review_service.update(review).await?))
}

#[utoipa::path(
    delete,
    path = "/reviews/{review_id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("review_id" = i32, Path, description = "Review id")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "review not found")
    )
)]
pub async fn delete_review(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<NoContent> {
    state.review_service.delete(id).await?;
    Ok(NoContent)
}

#[utoipa::path(
    get,
    path = "/reviews/salon/{salon_id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("salon_id" = i32, Path, description = "Salon id")),
    responses((status = 200, description = "Reviews of the salon", body = Vec<Review>))
)]
pub async fn list_by_salon(
    State(state): State<AppState>,
    ValidatedPath(salon_id): ValidatedPath<i32>,
) -> AppResult<Json<Vec<Review>>> {
    Ok(Json(state.review_service.list_by_salon(salon_id).await?))
}

#[utoipa::path(
    get,
    path = "/reviews/user/{user_id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "User id")),
    responses((status = 200, description = "Reviews by the user", body = Vec<Review>))
)]
pub async fn list_by_user(
    State(state): State<AppState>,
    ValidatedPath(user_id): ValidatedPath<i32>,
) -> AppResult<Json<Vec<Review>>> {
    Ok(Json(state.review_service.list_by_user(user_id).await?))
}

#[utoipa::path(
    get,
    path = "/reviews/rating/{rating}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("rating" = i32, Path, description = "Exact rating")),
    responses((status = 200, description = "Reviews with that rating", body = Vec<Review>))
)]
pub async fn list_by_rating(
    State(state): State<AppState>,
    ValidatedPath(rating): ValidatedPath<i32>,
) -> AppResult<Json<Vec<Review>>> {
    Ok(Json(state.review_service.list_by_rating(rating).await?))
}
