//! Jobboard application composition root
//!
//! Wires the Postgres repositories and JWT principal resolution into the
//! Applications router and adds the shared infrastructure routes.

use std::sync::Arc;

use axum::{routing::get, Router};
use jobboard_applications::{ApplicationsRepositories, ApplicationsState, StatusTransitionService};
use jobboard_auth::{AuthBackend, AuthConfig};
use jobboard_common::Config;
use sqlx::PgPool;

/// Create the main application router backed by Postgres
pub fn create_app(config: &Config, pool: PgPool) -> Router {
    let auth_config = AuthConfig {
        jwt_secret: config.jwt_secret.clone(),
        issuer: config.jwt_issuer.clone(),
        audience: config.jwt_audience.clone(),
    };

    let state = ApplicationsState {
        service: StatusTransitionService::from_repositories(ApplicationsRepositories::new(
            pool.clone(),
        )),
        principals: Arc::new(AuthBackend::new(pool, auth_config)),
    };

    compose(state)
}

/// Compose domain routers with shared infrastructure routes
pub fn compose(state: ApplicationsState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(|| async { "Jobboard API v0.0.1-SNAPSHOT" }))
        .merge(jobboard_applications::routes().with_state(state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
