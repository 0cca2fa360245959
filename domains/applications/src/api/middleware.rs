//! Applications domain state and principal resolver integration

use axum::extract::FromRef;
use jobboard_auth::SharedPrincipalResolver;

use crate::service::StatusTransitionService;

/// Application state for the Applications domain
#[derive(Clone)]
pub struct ApplicationsState {
    pub service: StatusTransitionService,
    pub principals: SharedPrincipalResolver,
}

impl FromRef<ApplicationsState> for SharedPrincipalResolver {
    fn from_ref(state: &ApplicationsState) -> Self {
        state.principals.clone()
    }
}
