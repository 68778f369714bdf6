//! Session bootstrap: restoring (or discarding) a persisted token.

use httpmock::prelude::*;
use serde_json::json;

use reviewhub_rs::{
    Access, FileTokenStore, MemoryTokenStore, ReviewHub, Session, SessionState, TokenStore,
};

#[tokio::test]
async fn bootstrap_without_a_token_resolves_without_network_traffic() {
    let server = MockServer::start_async().await;

    let profile = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/auth/profile");
            then.status(200);
        })
        .await;

    let client = ReviewHub::new(&server.base_url());
    let mut session = Session::new(client, MemoryTokenStore::new());

    assert_eq!(session.access(), Access::Unknown);

    session.bootstrap().await;

    assert_eq!(profile.hits_async().await, 0);
    assert_eq!(session.state(), SessionState::Resolved);
    assert_eq!(session.access(), Access::Anonymous);
}

#[tokio::test]
async fn bootstrap_restores_a_valid_session() {
    let server = MockServer::start_async().await;

    let profile = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/auth/profile")
                .header("authorization", "Bearer tok1");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "user": {
                        "id": 1,
                        "username": "john_doe",
                        "email": "john@example.com",
                        "email_verified": true
                    }
                }));
        })
        .await;

    let client = ReviewHub::new(&server.base_url());
    let mut session = Session::new(client, MemoryTokenStore::with_token("tok1"));
    session.bootstrap().await;

    profile.assert_async().await;
    assert_eq!(session.access(), Access::Verified);
    assert!(session.is_authenticated());
    assert_eq!(session.user().map(|u| u.username.as_str()), Some("john_doe"));
    assert_eq!(session.client().token().as_deref(), Some("tok1"));
}

#[tokio::test]
async fn bootstrap_with_a_rejected_token_ends_up_signed_out() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/auth/profile");
            then.status(401)
                .header("content-type", "application/json")
                .json_body(json!({"msg": "Token has expired"}));
        })
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let token_path = dir.path().join("token");
    std::fs::write(&token_path, "deadtoken").expect("seed token");

    let client = ReviewHub::new(&server.base_url());
    let mut session = Session::new(client, FileTokenStore::new(&token_path));
    session.bootstrap().await;

    // Identical to never having had a token: resolved, anonymous, and the
    // stored token is gone from disk and from the client.
    assert_eq!(session.state(), SessionState::Resolved);
    assert_eq!(session.access(), Access::Anonymous);
    assert!(!session.is_authenticated());
    assert!(session.client().token().is_none());
    assert_eq!(FileTokenStore::new(&token_path).get(), None);
    assert!(!token_path.exists());
}

#[tokio::test]
async fn bootstrap_runs_at_most_once() {
    let server = MockServer::start_async().await;

    let profile = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/auth/profile");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "user": {"id": 1, "username": "john_doe", "email": "j@e.c"}
                }));
        })
        .await;

    let client = ReviewHub::new(&server.base_url());
    let mut session = Session::new(client, MemoryTokenStore::with_token("tok1"));

    session.bootstrap().await;
    session.bootstrap().await;

    assert_eq!(profile.hits_async().await, 1);
}

#[tokio::test]
async fn unverified_identity_projects_as_unverified_access() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/auth/profile");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "user": {
                        "id": 2,
                        "username": "new_user",
                        "email": "new@example.com",
                        "email_verified": false
                    }
                }));
        })
        .await;

    let client = ReviewHub::new(&server.base_url());
    let mut session = Session::new(client, MemoryTokenStore::with_token("tok1"));
    session.bootstrap().await;

    assert_eq!(session.access(), Access::Unverified);
    assert!(session.is_authenticated());
    assert!(!session.is_email_verified());
}

#[tokio::test]
async fn login_persists_the_token_to_disk_and_logout_removes_it() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "access_token": "tok1",
                    "user": {"id": 1, "username": "john_doe", "email": "j@e.c", "email_verified": true}
                }));
        })
        .await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/logout");
            then.status(200);
        })
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let token_path = dir.path().join("token");

    let client = ReviewHub::new(&server.base_url());
    let mut session = Session::new(client, FileTokenStore::new(&token_path));
    session.bootstrap().await;

    session.login("john_doe", "password123").await.expect("login");
    assert_eq!(
        std::fs::read_to_string(&token_path).expect("token file").trim(),
        "tok1"
    );

    session.logout().await;
    assert!(!token_path.exists());
    assert!(!session.is_authenticated());
}
