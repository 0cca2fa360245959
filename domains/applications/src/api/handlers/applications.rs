//! Application status API handlers

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use jobboard_auth::{AuthError, AuthUser};
use jobboard_common::{Error, Result, ValidatedJson, ValidatedJsonRejection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::ApplicationsState;
use crate::domain::entities::Application;
use crate::domain::state::ApplicationStatus;
use crate::error::TransitionError;
use crate::service::AvailableTransitions;

/// Request for moving an application to a new status
#[derive(Debug, Deserialize, Validate)]
pub struct TransitionRequest {
    pub status: ApplicationStatus,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Application response DTO
#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub status: ApplicationStatus,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub notes: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Application> for ApplicationResponse {
    fn from(a: Application) -> Self {
        Self {
            id: a.id,
            job_id: a.job_id,
            candidate_id: a.candidate_id,
            status: a.status,
            cover_letter: a.cover_letter,
            resume_url: a.resume_url,
            notes: a.notes,
            applied_at: a.applied_at,
            updated_at: a.updated_at,
        }
    }
}

/// Unwrap the caller's identity, folding auth failures into the service's
/// error vocabulary
fn principal(auth: std::result::Result<AuthUser, AuthError>) -> Result<AuthUser> {
    auth.map_err(|e| {
        tracing::debug!(error = %e, "Request not authenticated");
        TransitionError::from(e).into()
    })
}

fn application_id(path: std::result::Result<Path<Uuid>, PathRejection>) -> Result<Uuid> {
    path.map(|Path(id)| id).map_err(|e| Error::Validation(e.body_text()))
}

/// PATCH /v1/applications/{id}/status
///
/// Path and body rejections are deferred until credentials are checked.
pub async fn update_status(
    State(state): State<ApplicationsState>,
    auth: std::result::Result<AuthUser, AuthError>,
    path: std::result::Result<Path<Uuid>, PathRejection>,
    body: std::result::Result<ValidatedJson<TransitionRequest>, ValidatedJsonRejection>,
) -> Result<Json<ApplicationResponse>> {
    let AuthUser(ctx) = principal(auth)?;
    let id = application_id(path)?;
    let ValidatedJson(req) = body?;

    let application = state
        .service
        .request_transition(&ctx, id, req.status, req.notes)
        .await?;

    Ok(Json(application.into()))
}

/// GET /v1/applications/{id}/transitions
pub async fn list_transitions(
    State(state): State<ApplicationsState>,
    auth: std::result::Result<AuthUser, AuthError>,
    path: std::result::Result<Path<Uuid>, PathRejection>,
) -> Result<Json<AvailableTransitions>> {
    let AuthUser(ctx) = principal(auth)?;
    let id = application_id(path)?;

    let transitions = state.service.available_transitions(&ctx, id).await?;

    Ok(Json(transitions))
}
