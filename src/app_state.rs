//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::WaitlistService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Waitlist service for all sign-up persistence.
    pub waitlist: Arc<WaitlistService>,
}
