//! HTTP surface of the Applications domain, driven through `oneshot`

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use jobboard_applications::ApplicationStatus;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use common::TestBoard;

/// Helper: build a request, optionally authenticated and with a JSON body
fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    if let Some(b) = body {
        builder = builder.header("content-type", "application/json");
        builder
            .body(Body::from(serde_json::to_string(&b).unwrap()))
            .unwrap()
    } else {
        builder.body(Body::empty()).unwrap()
    }
}

/// Helper: parse response body as JSON Value
async fn parse_body(response: axum::http::Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn send(board: &TestBoard, req: Request<Body>) -> (StatusCode, Value) {
    let resp = board.router().oneshot(req).await.unwrap();
    let status = resp.status();
    (status, parse_body(resp).await)
}

fn status_uri(id: Uuid) -> String {
    format!("/v1/applications/{}/status", id)
}

mod update_status {
    use super::*;

    #[tokio::test]
    async fn test_member_employer_moves_application() {
        let board = TestBoard::new();
        let employer_id = board.principals.register("emp-token", "employer");
        board.memberships.add_member(employer_id, board.company_id);
        let app = board.seed_application(Uuid::new_v4(), ApplicationStatus::Submitted);

        let (status, body) = send(
            &board,
            request(
                Method::PATCH,
                &status_uri(app.id),
                Some("emp-token"),
                Some(json!({"status": "reviewing", "notes": "Phone screen booked"})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], app.id.to_string());
        assert_eq!(body["status"], "reviewing");
        assert_eq!(body["notes"], "Phone screen booked");
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let board = TestBoard::new();
        let app = board.seed_application(Uuid::new_v4(), ApplicationStatus::Submitted);

        let (status, body) = send(
            &board,
            request(
                Method::PATCH,
                &status_uri(app.id),
                None,
                Some(json!({"status": "reviewing"})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "AUTHENTICATION_ERROR");
        assert_eq!(board.applications.write_count(), 0);
    }

    #[tokio::test]
    async fn test_credentials_checked_before_body() {
        let board = TestBoard::new();
        let app = board.seed_application(Uuid::new_v4(), ApplicationStatus::Submitted);

        let (status, body) = send(
            &board,
            request(
                Method::PATCH,
                &status_uri(app.id),
                None,
                Some(json!({"status": "hired"})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "AUTHENTICATION_ERROR");
    }

    #[tokio::test]
    async fn test_credentials_checked_before_path() {
        let board = TestBoard::new();

        let (status, _) = send(
            &board,
            request(
                Method::PATCH,
                "/v1/applications/not-a-uuid/status",
                None,
                Some(json!({"status": "reviewing"})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_id_is_bad_request() {
        let board = TestBoard::new();
        board.principals.register("admin-token", "admin");

        let (status, body) = send(
            &board,
            request(
                Method::PATCH,
                "/v1/applications/not-a-uuid/status",
                Some("admin-token"),
                Some(json!({"status": "reviewing"})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthorized() {
        let board = TestBoard::new();
        let app = board.seed_application(Uuid::new_v4(), ApplicationStatus::Submitted);

        let (status, _) = send(
            &board,
            request(
                Method::PATCH,
                &status_uri(app.id),
                Some("nobody"),
                Some(json!({"status": "reviewing"})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_denial_carries_reason_code() {
        let board = TestBoard::new();
        let candidate_id = board.principals.register("cand-token", "candidate");
        let app = board.seed_application(candidate_id, ApplicationStatus::Offer);

        let (status, body) = send(
            &board,
            request(
                Method::PATCH,
                &status_uri(app.id),
                Some("cand-token"),
                Some(json!({"status": "withdrawn"})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "CANNOT_WITHDRAW");
    }

    #[tokio::test]
    async fn test_illegal_transition_is_conflict() {
        let board = TestBoard::new();
        board.principals.register("admin-token", "admin");
        let app = board.seed_application(Uuid::new_v4(), ApplicationStatus::Rejected);

        let (status, body) = send(
            &board,
            request(
                Method::PATCH,
                &status_uri(app.id),
                Some("admin-token"),
                Some(json!({"status": "reviewing"})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "INVALID_TRANSITION");
    }

    #[tokio::test]
    async fn test_missing_application_is_not_found() {
        let board = TestBoard::new();
        board.principals.register("admin-token", "admin");

        let (status, body) = send(
            &board,
            request(
                Method::PATCH,
                &status_uri(Uuid::new_v4()),
                Some("admin-token"),
                Some(json!({"status": "reviewing"})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_unknown_status_is_bad_request() {
        let board = TestBoard::new();
        board.principals.register("admin-token", "admin");
        let app = board.seed_application(Uuid::new_v4(), ApplicationStatus::Submitted);

        let (status, body) = send(
            &board,
            request(
                Method::PATCH,
                &status_uri(app.id),
                Some("admin-token"),
                Some(json!({"status": "hired"})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_overlong_notes_are_rejected() {
        let board = TestBoard::new();
        board.principals.register("admin-token", "admin");
        let app = board.seed_application(Uuid::new_v4(), ApplicationStatus::Submitted);

        let (status, _) = send(
            &board,
            request(
                Method::PATCH,
                &status_uri(app.id),
                Some("admin-token"),
                Some(json!({"status": "reviewing", "notes": "n".repeat(2001)})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(board.applications.write_count(), 0);
    }
}

mod list_transitions {
    use super::*;

    #[tokio::test]
    async fn test_owner_sees_withdrawal() {
        let board = TestBoard::new();
        let candidate_id = board.principals.register("cand-token", "candidate");
        let app = board.seed_application(candidate_id, ApplicationStatus::Submitted);

        let (status, body) = send(
            &board,
            request(
                Method::GET,
                &format!("/v1/applications/{}/transitions", app.id),
                Some("cand-token"),
                None,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current"], "submitted");
        assert_eq!(body["allowed"], json!(["withdrawn"]));
    }

    #[tokio::test]
    async fn test_unknown_role_is_forbidden() {
        let board = TestBoard::new();
        board.principals.register("odd-token", "recruiter");
        let app = board.seed_application(Uuid::new_v4(), ApplicationStatus::Submitted);

        let (status, body) = send(
            &board,
            request(
                Method::GET,
                &format!("/v1/applications/{}/transitions", app.id),
                Some("odd-token"),
                None,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "INVALID_ACTOR");
    }
}
