//! Status transition service
//!
//! Orchestrates a single status move: load the application and its job,
//! run the authorization gate, validate against the transition table, then
//! persist with a compare-and-swap on the status that was read. No state is
//! kept between calls and nothing is retried here; a `Conflict` goes back to
//! the caller.

use std::sync::Arc;

use jobboard_auth::AuthContext;
use jobboard_common::RepositoryError;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::authorization::{Actor, AuthorizationGate, Decision, Denial, Standing};
use crate::domain::entities::{Application, JobProjection};
use crate::domain::state::{ApplicationStateMachine, ApplicationStatus};
use crate::error::TransitionError;
use crate::repository::{
    ApplicationRepository, ApplicationsRepositories, CompanyMembership, JobRepository,
};

/// Targets the calling actor could request right now
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableTransitions {
    pub application_id: Uuid,
    pub current: ApplicationStatus,
    pub allowed: Vec<ApplicationStatus>,
}

#[derive(Clone)]
pub struct StatusTransitionService {
    applications: Arc<dyn ApplicationRepository>,
    jobs: Arc<dyn JobRepository>,
    memberships: Arc<dyn CompanyMembership>,
}

impl StatusTransitionService {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        jobs: Arc<dyn JobRepository>,
        memberships: Arc<dyn CompanyMembership>,
    ) -> Self {
        Self {
            applications,
            jobs,
            memberships,
        }
    }

    /// Wire the service to the Postgres repositories
    pub fn from_repositories(repos: ApplicationsRepositories) -> Self {
        Self::new(
            Arc::new(repos.applications),
            Arc::new(repos.jobs),
            Arc::new(repos.memberships),
        )
    }

    /// Move an application to `target` on behalf of `ctx`.
    ///
    /// Exactly one status write happens on success and none on failure.
    pub async fn request_transition(
        &self,
        ctx: &AuthContext,
        application_id: Uuid,
        target: ApplicationStatus,
        notes: Option<String>,
    ) -> Result<Application, TransitionError> {
        let (application, job) = self.load(application_id, Some(target)).await?;
        let current = application.status;

        let decision = AuthorizationGate::authorize(
            self.memberships.as_ref(),
            ctx,
            &application,
            &job,
            target,
        )
        .await
        .map_err(|e| persistence_failure(e, application_id, current, target))?;

        if let Decision::Deny(denial) = decision {
            tracing::debug!(
                application_id = %application_id,
                actor_id = %ctx.user_id(),
                from = %current,
                to = %target,
                reason = denial.code(),
                "Status transition denied"
            );
            return Err(denial.into());
        }

        ApplicationStateMachine::validate(current, target).map_err(|e| {
            tracing::debug!(
                application_id = %application_id,
                error = %e,
                "Status transition rejected"
            );
            TransitionError::from(e)
        })?;

        let updated = self
            .applications
            .compare_and_swap_status(application_id, current, target, notes.as_deref())
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict => {
                    tracing::warn!(
                        application_id = %application_id,
                        from = %current,
                        to = %target,
                        "Status changed concurrently; transition not applied"
                    );
                    TransitionError::Conflict { expected: current }
                }
                other => persistence_failure(other, application_id, current, target),
            })?;

        tracing::info!(
            application_id = %application_id,
            actor_id = %ctx.user_id(),
            from = %current,
            to = %updated.status,
            "Application status updated"
        );

        Ok(updated)
    }

    /// List the statuses `ctx` could move the application to from its
    /// current status: table edges that also pass the authorization gate.
    ///
    /// Actors with no relationship to the application are refused outright.
    pub async fn available_transitions(
        &self,
        ctx: &AuthContext,
        application_id: Uuid,
    ) -> Result<AvailableTransitions, TransitionError> {
        let (application, job) = self.load(application_id, None).await?;
        let current = application.status;

        let actor = Actor::from_context(ctx)?;
        let standing = AuthorizationGate::standing(
            self.memberships.as_ref(),
            &actor,
            &application,
            &job,
        )
        .await
        .map_err(|e| {
            tracing::error!(
                application_id = %application_id,
                error = %e,
                "Failed to resolve company membership"
            );
            TransitionError::PersistenceFailure
        })?;

        // Unrelated actors get the same refusal a transition request would
        match standing {
            Standing::Candidate { owner: false } => return Err(Denial::NotOwner.into()),
            Standing::Employer { member: false } => return Err(Denial::NotCompanyMember.into()),
            _ => {}
        }

        let allowed = current
            .valid_transitions()
            .iter()
            .copied()
            .filter(|target| AuthorizationGate::decide(standing, current, *target).is_allowed())
            .collect();

        Ok(AvailableTransitions {
            application_id,
            current,
            allowed,
        })
    }

    async fn load(
        &self,
        application_id: Uuid,
        attempted: Option<ApplicationStatus>,
    ) -> Result<(Application, JobProjection), TransitionError> {
        let application = self
            .applications
            .get_by_id(application_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    application_id = %application_id,
                    to = ?attempted,
                    error = %e,
                    "Failed to load application"
                );
                TransitionError::PersistenceFailure
            })?
            .ok_or(TransitionError::NotFound("Application"))?;

        let job = self
            .jobs
            .get_by_id(application.job_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    application_id = %application_id,
                    job_id = %application.job_id,
                    to = ?attempted,
                    error = %e,
                    "Failed to load job"
                );
                TransitionError::PersistenceFailure
            })?
            .ok_or_else(|| {
                tracing::warn!(
                    application_id = %application_id,
                    job_id = %application.job_id,
                    "Application references a missing job"
                );
                TransitionError::NotFound("Job")
            })?;

        Ok((application, job))
    }
}

fn persistence_failure(
    err: RepositoryError,
    application_id: Uuid,
    from: ApplicationStatus,
    to: ApplicationStatus,
) -> TransitionError {
    tracing::error!(
        application_id = %application_id,
        from = %from,
        to = %to,
        error = %err,
        "Persistence failure during status transition"
    );
    TransitionError::PersistenceFailure
}
