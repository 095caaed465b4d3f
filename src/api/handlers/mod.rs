//! REST endpoint handlers organized by resource.

pub mod system;
pub mod waitlist;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new().merge(waitlist::routes())
}
