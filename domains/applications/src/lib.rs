//! Applications domain: lifecycle state machine, authorization, and
//! status transitions for job applications
//!
//! An application moves through a fixed set of statuses. Candidates may
//! withdraw their own applications; employers move applications on jobs
//! that belong to their company; admins may make any legal move. Every
//! change is written with a compare-and-swap on the status that was read,
//! so two concurrent requests against the same application cannot both win.

pub mod api;
pub mod domain;
pub mod error;
pub mod mock;
pub mod repository;
pub mod service;

pub use api::{routes, ApplicationsState};
pub use domain::authorization::{Actor, AuthorizationGate, Decision, Denial, Standing};
pub use domain::entities::{Application, JobProjection};
pub use domain::state::{ApplicationStateMachine, ApplicationStatus, StateError};
pub use error::TransitionError;
pub use repository::{
    ApplicationRepository, ApplicationsRepositories, CompanyMembership, JobRepository,
};
pub use service::{AvailableTransitions, StatusTransitionService};
