//! Route definitions for Applications domain API

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::applications;
use super::middleware::ApplicationsState;

/// Create all Applications domain API routes
pub fn routes() -> Router<ApplicationsState> {
    Router::new()
        .route(
            "/v1/applications/{id}/status",
            patch(applications::update_status),
        )
        .route(
            "/v1/applications/{id}/transitions",
            get(applications::list_transitions),
        )
}
