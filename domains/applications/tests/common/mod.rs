//! Shared fixtures for Applications domain tests
//!
//! A `TestBoard` is one company with one job, backed entirely by the
//! in-memory repositories, plus a principal resolver for HTTP tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use jobboard_applications::mock::{
    InMemoryApplicationRepository, InMemoryCompanyMembership, InMemoryJobRepository,
};
use jobboard_applications::{
    routes, Application, ApplicationRepository, ApplicationStatus, ApplicationsState,
    JobProjection, StatusTransitionService,
};
use jobboard_auth::mock::StaticPrincipalResolver;
use jobboard_auth::{AuthContext, AuthIdentity};
use uuid::Uuid;

pub struct TestBoard {
    pub applications: InMemoryApplicationRepository,
    pub jobs: InMemoryJobRepository,
    pub memberships: InMemoryCompanyMembership,
    pub principals: StaticPrincipalResolver,
    pub company_id: Uuid,
    pub job: JobProjection,
}

impl TestBoard {
    pub fn new() -> Self {
        let jobs = InMemoryJobRepository::new();
        let company_id = Uuid::new_v4();
        let job = jobs.add_job(company_id);

        Self {
            applications: InMemoryApplicationRepository::new(),
            jobs,
            memberships: InMemoryCompanyMembership::new(),
            principals: StaticPrincipalResolver::new(),
            company_id,
            job,
        }
    }

    pub fn service(&self) -> StatusTransitionService {
        self.service_with(Arc::new(self.applications.clone()))
    }

    /// Service over a substitute application store, sharing jobs and members
    pub fn service_with(
        &self,
        applications: Arc<dyn ApplicationRepository>,
    ) -> StatusTransitionService {
        StatusTransitionService::new(
            applications,
            Arc::new(self.jobs.clone()),
            Arc::new(self.memberships.clone()),
        )
    }

    pub fn router(&self) -> axum::Router {
        routes().with_state(ApplicationsState {
            service: self.service(),
            principals: Arc::new(self.principals.clone()),
        })
    }

    /// Seed an application on the board's job in `status`
    pub fn seed_application(&self, candidate_id: Uuid, status: ApplicationStatus) -> Application {
        let mut application = Application::new(self.job.id, candidate_id, None, None);
        application.status = status;
        self.applications.insert(application.clone());
        application
    }

    /// Employer context that belongs to the board's company
    pub fn member_employer(&self) -> AuthContext {
        let ctx = context("employer");
        self.memberships.add_member(ctx.user_id(), self.company_id);
        ctx
    }
}

/// Fresh principal with the given role string
pub fn context(role: &str) -> AuthContext {
    let now = Utc::now();
    let id = Uuid::new_v4();
    AuthContext::new(AuthIdentity {
        id,
        email: format!("{}@jobboard.test", id.simple()),
        name: None,
        role: role.to_string(),
        created_at: now,
        updated_at: now,
    })
}
