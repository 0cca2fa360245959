//! Authorization gate for status transitions
//!
//! Decides whether an actor may *request* a target status. Whether the
//! transition is legal from the current status is a separate question
//! answered by [`crate::domain::state::ApplicationStateMachine`].
//!
//! The decision itself is a pure function over the actor's role, their
//! standing towards the application, the current status and the target.
//! The only I/O is the company membership lookup, which
//! [`AuthorizationGate::authorize`] performs for employers alone.

use jobboard_auth::{ActorRole, AuthContext};
use jobboard_common::RepositoryError;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{Application, JobProjection};
use crate::domain::state::ApplicationStatus;
use crate::repository::CompanyMembership;

/// Reasons an actor may be refused
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    #[error("Actor role is not recognized")]
    InvalidActor,

    #[error("Application belongs to another candidate")]
    NotOwner,

    #[error("Candidates may only withdraw their applications")]
    CandidateActionNotAllowed,

    #[error("Application has already been processed and cannot be withdrawn")]
    CannotWithdraw,

    #[error("Actor is not a member of the company that owns this job")]
    NotCompanyMember,

    #[error("Application has been withdrawn by the candidate")]
    ApplicationWithdrawn,
}

impl Denial {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Denial::InvalidActor => "INVALID_ACTOR",
            Denial::NotOwner => "NOT_OWNER",
            Denial::CandidateActionNotAllowed => "CANDIDATE_ACTION_NOT_ALLOWED",
            Denial::CannotWithdraw => "CANNOT_WITHDRAW",
            Denial::NotCompanyMember => "NOT_COMPANY_MEMBER",
            Denial::ApplicationWithdrawn => "APPLICATION_WITHDRAWN",
        }
    }
}

/// Outcome of the authorization gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Identity plus recognized role of the requester
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: ActorRole,
}

impl Actor {
    /// Build an actor from an authenticated principal.
    ///
    /// Roles outside the closed [`ActorRole`] set are refused here.
    pub fn from_context(ctx: &AuthContext) -> Result<Self, Denial> {
        let role = ctx.role().map_err(|e| {
            tracing::debug!(
                user_id = %ctx.user_id(),
                error = %e,
                "Rejecting actor with unknown role"
            );
            Denial::InvalidActor
        })?;

        Ok(Actor {
            id: ctx.user_id(),
            role,
        })
    }
}

/// How the actor relates to the application under consideration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    /// Candidate; `owner` is true when they submitted the application
    Candidate { owner: bool },
    /// Employer; `member` is true when they belong to the job's company
    Employer { member: bool },
    Admin,
}

impl Standing {
    /// Derive the standing of `actor`, given the membership answer for employers
    pub fn of(actor: &Actor, application: &Application, company_member: bool) -> Self {
        match actor.role {
            ActorRole::Candidate => Standing::Candidate {
                owner: application.is_owned_by(actor.id),
            },
            ActorRole::Employer => Standing::Employer {
                member: company_member,
            },
            ActorRole::Admin => Standing::Admin,
        }
    }
}

/// Authorization gate
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// Decide whether an actor with `standing` may request `target` while the
    /// application sits in `current`. First matching rule wins.
    pub fn decide(
        standing: Standing,
        current: ApplicationStatus,
        target: ApplicationStatus,
    ) -> Decision {
        match standing {
            Standing::Candidate { owner } => {
                if !owner {
                    Decision::Deny(Denial::NotOwner)
                } else if target != ApplicationStatus::Withdrawn {
                    Decision::Deny(Denial::CandidateActionNotAllowed)
                } else if matches!(
                    current,
                    ApplicationStatus::Offer | ApplicationStatus::Rejected
                ) {
                    Decision::Deny(Denial::CannotWithdraw)
                } else {
                    Decision::Allow
                }
            }
            Standing::Employer { member } => {
                if !member {
                    Decision::Deny(Denial::NotCompanyMember)
                } else if current == ApplicationStatus::Withdrawn {
                    Decision::Deny(Denial::ApplicationWithdrawn)
                } else {
                    Decision::Allow
                }
            }
            Standing::Admin => Decision::Allow,
        }
    }

    /// Whether the gate needs a company membership answer for this actor
    pub fn needs_membership(actor: &Actor) -> bool {
        actor.role == ActorRole::Employer
    }

    /// Full gate: resolve the actor, look up company membership when the
    /// actor is an employer, then [`Self::decide`] against the application's
    /// loaded status.
    pub async fn authorize<M>(
        membership: &M,
        ctx: &AuthContext,
        application: &Application,
        job: &JobProjection,
        target: ApplicationStatus,
    ) -> Result<Decision, RepositoryError>
    where
        M: CompanyMembership + ?Sized,
    {
        let actor = match Actor::from_context(ctx) {
            Ok(actor) => actor,
            Err(denial) => return Ok(Decision::Deny(denial)),
        };

        let standing = Self::standing(membership, &actor, application, job).await?;
        Ok(Self::decide(standing, application.status, target))
    }

    /// Resolve the actor's standing, consulting `membership` only for employers
    pub async fn standing<M>(
        membership: &M,
        actor: &Actor,
        application: &Application,
        job: &JobProjection,
    ) -> Result<Standing, RepositoryError>
    where
        M: CompanyMembership + ?Sized,
    {
        let company_member = if Self::needs_membership(actor) {
            membership.is_member(actor.id, job.company_id).await?
        } else {
            false
        };

        Ok(Standing::of(actor, application, company_member))
    }
}
