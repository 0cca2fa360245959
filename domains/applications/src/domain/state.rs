//! Application lifecycle state machine
//!
//! The transition table is fixed domain knowledge: every status maps to a
//! `'static` slice of legal next statuses. There is no runtime registration
//! and no mutable global state.
//!
//! ```text
//! submitted  -> reviewing | rejected | withdrawn
//! reviewing  -> interview | offer | rejected | withdrawn
//! interview  -> offer | rejected | withdrawn
//! offer      -> rejected
//! rejected   -> (terminal)
//! withdrawn  -> (terminal)
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Invalid transition: cannot transition from {from} to {to}")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },

    #[error("Terminal state: {from} is a terminal state and cannot transition to {to}")]
    TerminalState {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
}

impl StateError {
    /// The `(from, to)` pair that was rejected
    pub fn pair(&self) -> (ApplicationStatus, ApplicationStatus) {
        match self {
            StateError::InvalidTransition { from, to } | StateError::TerminalState { from, to } => {
                (*from, *to)
            }
        }
    }
}

// ============================================================================
// Application Status
// ============================================================================

/// Application status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default,
)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Submitted,
    Reviewing,
    Interview,
    Offer,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 6] = [
        ApplicationStatus::Submitted,
        ApplicationStatus::Reviewing,
        ApplicationStatus::Interview,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
        ApplicationStatus::Withdrawn,
    ];

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [ApplicationStatus] {
        use ApplicationStatus::*;
        match self {
            Submitted => &[Reviewing, Rejected, Withdrawn],
            Reviewing => &[Interview, Offer, Rejected, Withdrawn],
            Interview => &[Offer, Rejected, Withdrawn],
            // An outstanding offer can be declined but not silently withdrawn
            Offer => &[Rejected],
            Rejected => &[],
            Withdrawn => &[],
        }
    }

    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Reviewing => "reviewing",
            Self::Interview => "interview",
            Self::Offer => "offer",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Transition Validator
// ============================================================================

/// Application state machine
pub struct ApplicationStateMachine;

impl ApplicationStateMachine {
    /// Whether `current -> target` is an edge of the transition table
    pub fn is_legal_transition(current: ApplicationStatus, target: ApplicationStatus) -> bool {
        current.valid_transitions().contains(&target)
    }

    /// Validate a requested transition
    ///
    /// Returns the target state if the transition is legal, or an error otherwise.
    pub fn validate(
        current: ApplicationStatus,
        target: ApplicationStatus,
    ) -> Result<ApplicationStatus, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState {
                from: current,
                to: target,
            });
        }

        if !Self::is_legal_transition(current, target) {
            return Err(StateError::InvalidTransition {
                from: current,
                to: target,
            });
        }

        Ok(target)
    }
}

// ============================================================================
// Tests
// ============================================================================
