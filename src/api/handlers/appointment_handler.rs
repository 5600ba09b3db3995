//! Appointment handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::{JsonBody, ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::api::AppState;
use crate::domain::{Appointment, AppointmentStatus};
use crate::errors::AppResult;
use crate::types::{DateRangeQuery, NoContent};

/// `?setting=email`
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationQuery {
    pub setting: String,
}

pub fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/appointment", post(create_appointment))
        .route("/appointment/update", put(update_appointment))
        .route(
            "/appointment/:appointment_id",
            get(get_appointment).delete(delete_appointment),
        )
        .route(
            "/appointment/:appointment_id/notification",
            put(set_notification),
        )
        .route("/appointment/:appointment_id/cancel", put(cancel_appointment))
        .route("/appointment/:appointment_id/confirm", put(confirm_appointment))
        .route(
            "/appointment/:appointment_id/reschedule",
            put(reschedule_appointment),
        )
        .route("/appointments/user/:user_id", get(list_by_user))
        .route("/appointments/salon/:salon_id", get(list_by_salon))
        .route("/appointments/service/:service_id", get(list_by_service))
        .route("/appointments/status/:status", get(list_by_status))
        .route("/appointments/notification", get(list_by_notification))
        .route("/appointments/upcoming", get(list_upcoming))
        .route("/appointments/past", get(list_past))
        .route("/appointments/range", get(list_by_date_range))
}

#[utoipa::path(
    post,
    path = "/appointment",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    request_body = Appointment,
    responses(
        (status = 201, description = "Appointment created", body = Appointment),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    ValidatedJson(appointment): ValidatedJson<Appointment>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    let created = state.appointment_service.create(appointment).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/appointment/update",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    request_body = Appointment,
    responses(
        (status = 200, description = "Appointment updated", body = Appointment),
        (status = 400, description = "Missing appointment_id or invalid body"),
        (status = 404, description = "appointment not found"),
        (status = 409, description = "Status differs from stored; use confirm/cancel")
    )
)]
pub async fn update_appointment(
    State(state): State<AppState>,
    ValidatedJson(appointment): ValidatedJson<Appointment>,
) -> AppResult<Json<Appointment>> {
    Ok(Json(state.appointment_service.update(appointment).await?))
}

#[utoipa::path(
    get,
    path = "/appointment/{appointment_id}",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(("appointment_id" = i32, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment", body = Appointment),
        (status = 404, description = "appointment not found")
    )
)]
pub async fn get_appointment(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<Json<Appointment>> {
    Ok(Json(state.appointment_service.get(id).await?))
}

#[utoipa::path(
    delete,
    path = "/appointment/{appointment_id}",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(("appointment_id" = i32, Path, description = "Appointment id")),
    responses(
        (status = 204, description = "Appointment deleted"),
        (status = 404, description = "appointment not found")
    )
)]
pub async fn delete_appointment(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<NoContent> {
    state.appointment_service.delete(id).await?;
    Ok(NoContent)
}

/// Body is a bare JSON string, e.g. `"sms"`.
#[utoipa::path(
    put,
    path = "/appointment/{appointment_id}/notification",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(("appointment_id" = i32, Path, description = "Appointment id")),
    request_body(content = String, description = "Notification channel", example = json!("sms")),
    responses(
        (status = 200, description = "Updated appointment", body = Appointment),
        (status = 404, description = "appointment not found")
    )
)]
pub async fn set_notification(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
    JsonBody(setting): JsonBody<String>,
) -> AppResult<Json<Appointment>> {
    Ok(Json(
        state.appointment_service.set_notification(id, setting).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/appointment/{appointment_id}/cancel",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(("appointment_id" = i32, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment cancelled", body = Appointment),
        (status = 404, description = "appointment not found"),
        (status = 409, description = "Already cancelled")
    )
)]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<Json<Appointment>> {
    Ok(Json(state.appointment_service.cancel(id).await?))
}

#[utoipa::path(
    put,
    path = "/appointment/{appointment_id}/confirm",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(("appointment_id" = i32, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment confirmed", body = Appointment),
        (status = 404, description = "appointment not found"),
        (status = 409, description = "Not pending")
    )
)]
pub async fn confirm_appointment(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<Json<Appointment>> {
    Ok(Json(state.appointment_service.confirm(id).await?))
}

/// Body is a bare RFC3339 JSON string.
#[utoipa::path(
    put,
    path = "/appointment/{appointment_id}/reschedule",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(("appointment_id" = i32, Path, description = "Appointment id")),
    request_body(content = String, description = "New time (RFC3339)", example = json!("2030-01-02T15:00:00Z")),
    responses(
        (status = 200, description = "Appointment moved", body = Appointment),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "appointment not found"),
        (status = 409, description = "Appointment is cancelled")
    )
)]
pub async fn reschedule_appointment(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
    JsonBody(date_time): JsonBody<DateTime<Utc>>,
) -> AppResult<Json<Appointment>> {
    Ok(Json(
        state.appointment_service.reschedule(id, date_time).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/appointments/user/{user_id}",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "User id")),
    responses((status = 200, description = "Appointments of the user", body = Vec<Appointment>))
)]
pub async fn list_by_user(
    State(state): State<AppState>,
    ValidatedPath(user_id): ValidatedPath<i32>,
) -> AppResult<Json<Vec<Appointment>>> {
    Ok(Json(state.appointment_service.list_by_user(user_id).await?))
}

#[utoipa::path(
    get,
    path = "/appointments/salon/{salon_id}",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(("salon_id" = i32, Path, description = "Salon id")),
    responses((status = 200, description = "Appointments at the salon", body = Vec<Appointment>))
)]
pub async fn list_by_salon(
    State(state): State<AppState>,
    ValidatedPath(salon_id): ValidatedPath<i32>,
) -> AppResult<Json<Vec<Appointment>>> {
    Ok(Json(state.appointment_service.list_by_salon(salon_id).await?))
}

#[utoipa::path(
    get,
    path = "/appointments/service/{service_id}",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(("service_id" = i32, Path, description = "Service id")),
    responses((status = 200, description = "Appointments for the service", body = Vec<Appointment>))
)]
pub async fn list_by_service(
    State(state): State<AppState>,
    ValidatedPath(service_id): ValidatedPath<i32>,
) -> AppResult<Json<Vec<Appointment>>> {
    Ok(Json(
        state.appointment_service.list_by_service(service_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/appointments/status/{status}",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(("status" = String, Path, description = "Pending, Confirmed or Cancelled")),
    responses(
        (status = 200, description = "Appointments in the given state", body = Vec<Appointment>),
        (status = 400, description = "Unknown status")
    )
)]
pub async fn list_by_status(
    State(state): State<AppState>,
    ValidatedPath(status): ValidatedPath<String>,
) -> AppResult<Json<Vec<Appointment>>> {
    let status: AppointmentStatus = status.parse()?;
    Ok(Json(state.appointment_service.list_by_status(status).await?))
}

#[utoipa::path(
    get,
    path = "/appointments/notification",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(NotificationQuery),
    responses((status = 200, description = "Appointments with that preference", body = Vec<Appointment>))
)]
pub async fn list_by_notification(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<NotificationQuery>,
) -> AppResult<Json<Vec<Appointment>>> {
    Ok(Json(
        state
            .appointment_service
            .list_by_notification(query.setting)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/appointments/upcoming",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Appointments from now on", body = Vec<Appointment>))
)]
pub async fn list_upcoming(State(state): State<AppState>) -> AppResult<Json<Vec<Appointment>>> {
    Ok(Json(state.appointment_service.list_upcoming().await?))
}

#[utoipa::path(
    get,
    path = "/appointments/past",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Appointments before now", body = Vec<Appointment>))
)]
pub async fn list_past(State(state): State<AppState>) -> AppResult<Json<Vec<Appointment>>> {
    Ok(Json(state.appointment_service.list_past().await?))
}

#[utoipa::path(
    get,
    path = "/appointments/range",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Appointments inside the range", body = Vec<Appointment>),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn list_by_date_range(
    State(state): State<AppState>,
    ValidatedQuery(range): ValidatedQuery<DateRangeQuery>,
) -> AppResult<Json<Vec<Appointment>>> {
    let (start, end) = range.parse()?;
    Ok(Json(
        state
            .appointment_service
            .list_by_date_range(start, end)
            .await?,
    ))
}
