//! Bearer-token guard for the protected routes.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::{AppError, AppResult};

/// The signed-in account, available to handlers as `Extension<CurrentUser>`
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub username: String,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Rejects the request with 401 unless it carries a valid token.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let Some(token) = bearer_token(request.headers()) else {
        tracing::debug!(path = %request.uri().path(), "Request without bearer token");
        return Err(AppError::Unauthorized);
    };

    let username = state.auth_service.verify_token(token)?.sub;
    request.extensions_mut().insert(CurrentUser { username });

    Ok(next.run(request).await)
}
