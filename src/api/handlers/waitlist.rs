//! Waitlist ingestion handler.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{SignupRequest, SignupResponse};
use crate::app_state::AppState;
use crate::domain::NewSignup;
use crate::error::{ApiError, ErrorResponse};

/// `POST /api/waitlist` — Join the waitlist.
///
/// Normalizes and validates the submitted name/email, then performs an
/// idempotent insert-if-absent: the primary store when configured and
/// reachable, the file store otherwise. Re-submitting an email that is
/// already on the list is a success and leaves the stored entry untouched.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] when validation fails and
/// [`ApiError::Internal`] when the request body is not valid JSON.
#[utoipa::path(
    post,
    path = "/api/waitlist",
    tag = "Waitlist",
    summary = "Join the waitlist",
    description = "Validates a name/email pair and stores it exactly once per distinct email. Reports which backend persisted the entry.",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Entry stored (or already present)", body = SignupResponse),
        (status = 400, description = "Empty name or malformed email", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse),
    )
)]
pub async fn join_waitlist(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // An unparseable body is an unexpected failure, not a validation one.
    let Json(req) = payload.map_err(|e| ApiError::Internal(format!("request body: {e}")))?;

    let signup = NewSignup::parse(
        req.name.as_deref().unwrap_or(""),
        req.email.as_deref().unwrap_or(""),
    )
    .map_err(ApiError::InvalidInput)?;

    let receipt = state.waitlist.record_signup(signup).await?;

    Ok(Json(SignupResponse {
        ok: true,
        storage: receipt.storage,
    }))
}

/// Waitlist routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/waitlist", post(join_waitlist))
}
