//! Typed failures of the status transition service

use jobboard_auth::AuthError;
use jobboard_common::Error;
use thiserror::Error;

use crate::domain::authorization::Denial;
use crate::domain::state::{ApplicationStatus, StateError};

/// Everything `request_transition` can fail with
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransitionError {
    #[error("Authentication required")]
    Unauthenticated,

    /// The application, or the job it points at, does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Denied(#[from] Denial),

    #[error("Invalid transition: cannot move application from {from} to {to}")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },

    /// Lost the optimistic concurrency race; reload and decide again
    #[error("Application status changed from {expected} while the request was processed")]
    Conflict { expected: ApplicationStatus },

    /// Storage failure. Details are logged where it happens, never carried here.
    #[error("Failed to update application status")]
    PersistenceFailure,
}

impl TransitionError {
    /// Stable error code, as clients receive it in the error envelope
    pub fn code(&self) -> &'static str {
        match self {
            TransitionError::Unauthenticated => "AUTHENTICATION_ERROR",
            TransitionError::NotFound(_) => "NOT_FOUND",
            TransitionError::Denied(denial) => denial.code(),
            TransitionError::InvalidTransition { .. } => "INVALID_TRANSITION",
            TransitionError::Conflict { .. } => "CONFLICT",
            TransitionError::PersistenceFailure => "INTERNAL_ERROR",
        }
    }
}

impl From<StateError> for TransitionError {
    fn from(err: StateError) -> Self {
        let (from, to) = err.pair();
        TransitionError::InvalidTransition { from, to }
    }
}

impl From<AuthError> for TransitionError {
    fn from(err: AuthError) -> Self {
        if err.is_unauthenticated() {
            TransitionError::Unauthenticated
        } else {
            TransitionError::PersistenceFailure
        }
    }
}

impl From<TransitionError> for Error {
    fn from(err: TransitionError) -> Self {
        let code = err.code();
        match err {
            TransitionError::Unauthenticated => Error::Authentication(err.to_string()),
            TransitionError::NotFound(_) => Error::NotFound(err.to_string()),
            TransitionError::Denied(_) => Error::Authorization {
                code,
                message: err.to_string(),
            },
            TransitionError::InvalidTransition { .. } | TransitionError::Conflict { .. } => {
                Error::Conflict {
                    code,
                    message: err.to_string(),
                }
            }
            TransitionError::PersistenceFailure => Error::Internal(err.to_string()),
        }
    }
}
