//! Waitlist sign-up DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::persistence::StorageKind;

/// Request body for `POST /api/waitlist`.
///
/// Both fields are optional on the wire; a missing field is treated as an
/// empty string and rejected by validation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    /// Display name to store alongside the email.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address; trimmed and lowercased before storage.
    #[serde(default)]
    pub email: Option<String>,
}

/// Success response body for `POST /api/waitlist`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SignupResponse {
    /// Always `true` on the success path.
    pub ok: bool,
    /// Backend that persisted (or already held) the entry.
    pub storage: StorageKind,
}
