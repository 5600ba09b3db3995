//! Salon catalog handlers: salons, their services and average rating.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};

use crate::api::extractors::{ValidatedJson, ValidatedPath};
use crate::api::AppState;
use crate::domain::{AverageRating, Salon, SalonCreated, Service, ServiceCreated};
use crate::errors::AppResult;
use crate::types::NoContent;

pub fn salon_routes() -> Router<AppState> {
    Router::new()
        .route("/salon", post(add_salon))
        .route("/salon/update", put(update_salon))
        .route("/salons", get(list_salons))
        .route("/salon/:salon_id", get(get_salon).delete(delete_salon))
        .route("/salon/:salon_id/services", get(list_services_by_salon))
        .route("/salon/:salon_id/average-rating", get(get_average_rating))
        .route("/service", post(add_service))
        .route("/service/update", put(update_service))
        .route("/service/:service_id", get(get_service).delete(delete_service))
}

#[utoipa::path(
    post,
    path = "/salon",
    tag = "Salons",
    security(("bearer_auth" = [])),
    request_body = Salon,
    responses(
        (status = 201, description = "Salon created", body = SalonCreated),
        (status = 400, description = "Validation error")
    )
)]
pub async fn add_salon(
    State(state): State<AppState>,
    ValidatedJson(salon): ValidatedJson<Salon>,
) -> AppResult<(StatusCode, Json<SalonCreated>)> {
    let salon_id = state.catalog_service.add_salon(salon).await?;
    Ok((StatusCode::CREATED, Json(SalonCreated { salon_id })))
}

#[utoipa::path(
    put,
    path = "/salon/update",
    tag = "Salons",
    security(("bearer_auth" = [])),
    request_body = Salon,
    responses(
        (status = 200, description = "Salon updated", body = Salon),
        (status = 400, description = "Missing salon_id or invalid body"),
        (status = 404, description = "Salon not found")
    )
)]
pub async fn update_salon(
    State(state): State<AppState>,
    ValidatedJson(salon): ValidatedJson<Salon>,
) -> AppResult<Json<Salon>> {
    Ok(Json(state.catalog_service.update_salon(salon).await?))
}

#[utoipa::path(
    get,
    path = "/salons",
    tag = "Salons",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All salons", body = Vec<Salon>))
)]
pub async fn list_salons(State(state): State<AppState>) -> AppResult<Json<Vec<Salon>>> {
    Ok(Json(state.catalog_service.list_salons().await?))
}

#[utoipa::path(
    get,
    path = "/salon/{salon_id}",
    tag = "Salons",
    security(("bearer_auth" = [])),
    params(("salon_id" = i32, Path, description = "Salon id")),
    responses(
        (status = 200, description = "Salon", body = Salon),
        (status = 404, description = "Salon not found")
    )
)]
pub async fn get_salon(
    State(state): State<AppState>,
    ValidatedPath(salon_id): ValidatedPath<i32>,
) -> AppResult<Json<Salon>> {
    Ok(Json(state.catalog_service.get_salon(salon_id).await?))
}

#[utoipa::path(
    delete,
    path = "/salon/{salon_id}",
    tag = "Salons",
    security(("bearer_auth" = [])),
    params(("salon_id" = i32, Path, description = "Salon id")),
    responses(
        (status = 204, description = "Salon deleted"),
        (status = 404, description = "Salon not found")
    )
)]
pub async fn delete_salon(
    State(state): State<AppState>,
    ValidatedPath(salon_id): ValidatedPath<i32>,
) -> AppResult<NoContent> {
    state.catalog_service.delete_salon(salon_id).await?;
    Ok(NoContent)
}

#[utoipa::path(
    get,
    path = "/salon/{salon_id}/services",
    tag = "Salons",
    security(("bearer_auth" = [])),
    params(("salon_id" = i32, Path, description = "Salon id")),
    responses((status = 200, description = "Services offered by the salon", body = Vec<Service>))
)]
pub async fn list_services_by_salon(
    State(state): State<AppState>,
    ValidatedPath(salon_id): ValidatedPath<i32>,
) -> AppResult<Json<Vec<Service>>> {
    Ok(Json(
        state.catalog_service.list_services_by_salon(salon_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/salon/{salon_id}/average-rating",
    tag = "Salons",
    security(("bearer_auth" = [])),
    params(("salon_id" = i32, Path, description = "Salon id")),
    responses(
        (status = 200, description = "Stored average rating", body = AverageRating),
        (status = 404, description = "Salon not found")
    )
)]
pub async fn get_average_rating(
    State(state): State<AppState>,
    ValidatedPath(salon_id): ValidatedPath<i32>,
) -> AppResult<Json<AverageRating>> {
    let average_rating = state.catalog_service.average_rating(salon_id).await?;
    Ok(Json(AverageRating { average_rating }))
}

#[utoipa::path(
    post,
    path = "/service",
    tag = "Services",
    security(("bearer_auth" = [])),
    request_body = Service,
    responses(
        (status = 201, description = "Service created", body = ServiceCreated),
        (status = 400, description = "Validation error")
    )
)]
pub async fn add_service(
    State(state): State<AppState>,
    ValidatedJson(service): ValidatedJson<Service>,
) -> AppResult<(StatusCode, Json<ServiceCreated>)> {
    let service_id = state.catalog_service.add_service(service).await?;
    Ok((StatusCode::CREATED, Json(ServiceCreated { service_id })))
}

#[utoipa::path(
    put,
    path = "/service/update",
    tag = "Services",
    security(("bearer_auth" = [])),
    request_body = Service,
    responses(
        (status = 200, description = "Service updated", body = Service),
        (status = 400, description = "Missing service_id or invalid body"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn update_service(
    State(state): State<AppState>,
    ValidatedJson(service): ValidatedJson<Service>,
) -> AppResult<Json<Service>> {
    Ok(Json(state.catalog_service.update_service(service).await?))
}

#[utoipa::path(
    get,
    path = "/service/{service_id}",
    tag = "Services",
    security(("bearer_auth" = [])),
    params(("service_id" = i32, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service", body = Service),
        (status = 404, description = "Service not found")
    )
)]
pub async fn get_service(
    State(state): State<AppState>,
    ValidatedPath(service_id): ValidatedPath<i32>,
) -> AppResult<Json<Service>> {
    Ok(Json(state.catalog_service.get_service(service_id).await?))
}

#[utoipa::path(
    delete,
    path = "/service/{service_id}",
    tag = "Services",
    security(("bearer_auth" = [])),
    params(("service_id" = i32, Path, description = "Service id")),
    responses(
        (status = 204, description = "Service deleted"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn delete_service(
    State(state): State<AppState>,
    ValidatedPath(service_id): ValidatedPath<i32>,
) -> AppResult<NoContent> {
    state.catalog_service.delete_service(service_id).await?;
    Ok(NoContent)
}
