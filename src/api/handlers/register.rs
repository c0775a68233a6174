//! User registration handler.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::RegisterRequest;
use crate::app_state::AppState;
use crate::error::{ApiError, MessageResponse};

/// `POST /api/register` — Register a new user.
///
/// Parses the JSON body, validates that all three fields are present
/// and non-empty, and issues one parameterized INSERT through the
/// pooled store. Database failures are logged server-side and surface
/// to the client only as the generic 500 message.
///
/// # Errors
///
/// Returns [`ApiError::MissingFields`] or [`ApiError::MalformedBody`]
/// (HTTP 400) before any database access, and [`ApiError::Database`]
/// (HTTP 500) when the INSERT fails.
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Registration",
    summary = "Register a new user",
    description = "Persists a user record with full name, email, and password. All three fields are required and must be non-empty.",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered", body = MessageResponse),
        (status = 400, description = "Missing or empty fields", body = MessageResponse),
        (status = 500, description = "Database failure", body = MessageResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;

    let user = request.into_new_user().ok_or(ApiError::MissingFields)?;

    state.user_service.register(&user).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Usuario registrado correctamente")),
    ))
}

/// Registration routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/register", post(register))
}
