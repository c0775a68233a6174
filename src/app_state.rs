//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::UserService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Built once by the process entry point after the database pool is
/// initialized; there is no module-level singleton.
#[derive(Debug, Clone)]
pub struct AppState {
    /// User service for registration logic.
    pub user_service: Arc<UserService>,
}
