//! Availability slot handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};

use crate::api::extractors::{ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::api::AppState;
use crate::domain::{Availability, AvailabilityStatus};
use crate::errors::AppResult;
use crate::types::{DateRangeQuery, NoContent};

pub fn availability_routes() -> Router<AppState> {
    Router::new()
        .route("/availability", post(create_availability))
        .route("/availability/update", put(update_availability))
        .route(
            "/availability/:availability_id",
            get(get_availability).delete(delete_availability),
        )
        .route("/availability/:availability_id/book", put(book_availability))
        .route("/availability/:availability_id/cancel", put(cancel_booking))
        .route("/availabilities/salon/:salon_id", get(list_by_salon))
        .route("/availabilities/service/:service_id", get(list_by_service))
        .route("/availabilities/status/:status", get(list_by_status))
        .route("/availabilities/open/:service_id/:salon_id", get(list_open))
        .route("/availabilities/booked/:service_id/:salon_id", get(list_booked))
        .route("/availabilities/range", get(list_by_date_range))
}

#[utoipa::path(
    post,
    path = "/availability",
    tag = "Availability",
    security(("bearer_auth" = [])),
    request_body = Availability,
    responses(
        (status = 201, description = "Slot created", body = Availability),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_availability(
    State(state): State<AppState>,
    ValidatedJson(slot): ValidatedJson<Availability>,
) -> AppResult<(StatusCode, Json<Availability>)> {
    let created = state.availability_service.create(slot).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/availability/update",
    tag = "Availability",
    security(("bearer_auth" = [])),
    request_body = Availability,
    responses(
        (status = 200, description = "Slot updated", body = Availability),
        (status = 400, description = "Missing availability_id or invalid body"),
        (status = 404, description = "availability not found"),
        (status = 409, description = "Status differs from stored; use book/cancel")
    )
)]
pub async fn update_availability(
    State(state): State<AppState>,
    ValidatedJson(slot): ValidatedJson<Availability>,
) -> AppResult<Json<Availability>> {
    Ok(Json(state.availability_service.update(slot).await?))
}

#[utoipa::path(
    get,
    path = "/availability/{availability_id}",
    tag = "Availability",
    security(("bearer_auth" = [])),
    params(("availability_id" = i32, Path, description = "Slot id")),
    responses(
        (status = 200, description = "Slot", body = Availability),
        (status = 404, description = "availability not found")
    )
)]
pub async fn get_availability(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<Json<Availability>> {
    Ok(Json(state.availability_service.get(id).await?))
}

#[utoipa::path(
    delete,
    path = "/availability/{availability_id}",
    tag = "Availability",
    security(("bearer_auth" = [])),
    params(("availability_id" = i32, Path, description = "Slot id")),
    responses(
        (status = 204, description = "Slot deleted"),
        (status = 404, description = "availability not found")
    )
)]
pub async fn delete_availability(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<NoContent> {
    state.availability_service.delete(id).await?;
    Ok(NoContent)
}

#[utoipa::path(
    put,
    path = "/availability/{availability_id}/book",
    tag = "Availability",
    security(("bearer_auth" = [])),
    params(("availability_id" = i32, Path, description = "Slot id")),
    responses(
        (status = 200, description = "Slot booked", body = Availability),
        (status = 404, description = "availability not found"),
        (status = 409, description = "Slot is already booked")
    )
)]
pub async fn book_availability(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<Json<Availability>> {
    Ok(Json(state.availability_service.book(id).await?))
}

#[utoipa::path(
    put,
    path = "/availability/{availability_id}/cancel",
    tag = "Availability",
    security(("bearer_auth" = [])),
    params(("availability_id" = i32, Path, description = "Slot id")),
    responses(
        (status = 200, description = "Booking released", body = Availability),
        (status = 404, description = "availability not found"),
        (status = 409, description = "Slot is not booked")
    )
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<Json<Availability>> {
    Ok(Json(state.availability_service.cancel_booking(id).await?))
}

#[utoipa::path(
    get,
    path = "/availabilities/salon/{salon_id}",
    tag = "Availability",
    security(("bearer_auth" = [])),
    params(("salon_id" = i32, Path, description = "Salon id")),
    responses((status = 200, description = "Slots at the salon", body = Vec<Availability>))
)]
pub async fn list_by_salon(
    State(state): State<AppState>,
    ValidatedPath(salon_id): ValidatedPath<i32>,
) -> AppResult<Json<Vec<Availability>>> {
    Ok(Json(state.availability_service.list_by_salon(salon_id).await?))
}

#[utoipa::path(
    get,
    path = "/availabilities/service/{service_id}",
    tag = "Availability",
    security(("bearer_auth" = [])),
    params(("service_id" = i32, Path, description = "Service id")),
    responses((status = 200, description = "Slots for the service", body = Vec<Availability>))
)]
pub async fn list_by_service(
    State(state): State<AppState>,
    ValidatedPath(service_id): ValidatedPath<i32>,
) -> AppResult<Json<Vec<Availability>>> {
    Ok(Json(
        state.availability_service.list_by_service(service_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/availabilities/status/{status}",
    tag = "Availability",
    security(("bearer_auth" = [])),
    params(("status" = String, Path, description = "Open or Booked")),
    responses(
        (status = 200, description = "Slots in the given state", body = Vec<Availability>),
        (status = 400, description = "Unknown status")
    )
)]
pub async fn list_by_status(
    State(state): State<AppState>,
    ValidatedPath(status): ValidatedPath<String>,
) -> AppResult<Json<Vec<Availability>>> {
    let status: AvailabilityStatus = status.parse()?;
    Ok(Json(state.availability_service.list_by_status(status).await?))
}

#[utoipa::path(
    get,
    path = "/availabilities/open/{service_id}/{salon_id}",
    tag = "Availability",
    security(("bearer_auth" = [])),
    params(
        ("service_id" = i32, Path, description = "Service id"),
        ("salon_id" = i32, Path, description = "Salon id")
    ),
    responses((status = 200, description = "Open slots", body = Vec<Availability>))
)]
pub async fn list_open(
    State(state): State<AppState>,
    ValidatedPath((service_id, salon_id)): ValidatedPath<(i32, i32)>,
) -> AppResult<Json<Vec<Availability>>> {
    Ok(Json(
        state
            .availability_service
            .list_open(service_id, salon_id)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/availabilities/booked/{service_id}/{salon_id}",
    tag = "Availability",
    security(("bearer_auth" = [])),
    params(
        ("service_id" = i32, Path, description = "Service id"),
        ("salon_id" = i32, Path, description = "Salon id")
    ),
    responses((status = 200, description = "Booked slots", body = Vec<Availability>))
)]
pub async fn list_booked(
    State(state): State<AppState>,
    ValidatedPath((service_id, salon_id)): ValidatedPath<(i32, i32)>,
) -> AppResult<Json<Vec<Availability>>> {
    Ok(Json(
        state
            .availability_service
            .list_booked(service_id, salon_id)
            .await?,
    ))
}

/// Bounds are checked as RFC3339 but matched against stored text.
#[utoipa::path(
    get,
    path = "/availabilities/range",
    tag = "Availability",
    security(("bearer_auth" = [])),
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Slots inside the range", body = Vec<Availability>),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn list_by_date_range(
    State(state): State<AppState>,
    ValidatedQuery(range): ValidatedQuery<DateRangeQuery>,
) -> AppResult<Json<Vec<Availability>>> {
    range.parse()?;
    Ok(Json(
        state
            .availability_service
            .list_by_date_range(range.start_date, range.end_date)
            .await?,
    ))
}
