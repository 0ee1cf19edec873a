//! Integration tests for sign-up and sign-in

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_sign_up_success_with_default_role() {
    let app = common::TestApp::new().await;

    let email = common::unique_email("signup");
    let (status, response) = app
        .post("/api/auth/signUp", &common::sign_up_body(&email))
        .await;

    assert_eq!(status, StatusCode::CREATED, "{response}");

    let user: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(user["email"], email);
    assert_eq!(user["roles"], json!(["user"]));
    assert_eq!(user["lastName"], "B");
    // The hash never leaves the server
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_sign_up_duplicate_email_conflicts() {
    let app = common::TestApp::new().await;

    let email = common::unique_email("duplicate");
    let body = common::sign_up_body(&email);

    let (status, _) = app.post("/api/auth/signUp", &body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.post("/api/auth/signUp", &body).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_concurrent_duplicate_sign_ups_exactly_one_wins() {
    let app = common::TestApp::new().await;

    let email = common::unique_email("race");
    let body = common::sign_up_body(&email);

    let (first, second) = tokio::join!(
        app.post("/api/auth/signUp", &body),
        app.post("/api/auth/signUp", &body),
    );

    let mut statuses = [first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_sign_up_email_stored_lowercased() {
    let app = common::TestApp::new().await;

    let email = common::unique_email("case");
    let upper = email.to_uppercase();
    let (status, response) = app
        .post("/api/auth/signUp", &common::sign_up_body(&upper))
        .await;

    assert_eq!(status, StatusCode::CREATED, "{response}");
    let user: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(user["email"], email.to_lowercase());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_sign_in_issues_token() {
    let app = common::TestApp::new().await;

    let email = common::unique_email("signin");
    let (status, _) = app
        .post("/api/auth/signUp", &common::sign_up_body(&email))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let token = app.sign_in(&email, "Abcdef1#").await;
    assert!(!token.is_empty());

    // The token works against a protected route
    let (status, response) = app.get("/api/users/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let profile: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(profile["email"], email);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_sign_in_failures_are_indistinguishable() {
    let app = common::TestApp::new().await;

    let email = common::unique_email("generic");
    let (status, _) = app
        .post("/api/auth/signUp", &common::sign_up_body(&email))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let wrong_password = json!({ "email": email, "password": "Wrong12#" }).to_string();
    let unknown_email = json!({
        "email": common::unique_email("nobody"),
        "password": "Abcdef1#"
    })
    .to_string();

    let (status_a, body_a) = app.post("/api/auth/signIn", &wrong_password).await;
    let (status_b, body_b) = app.post("/api/auth/signIn", &unknown_email).await;

    assert_eq!(status_a, StatusCode::UNAUTHORIZED);
    assert_eq!(status_b, StatusCode::UNAUTHORIZED);
    // Same body for both: no hint which part was wrong
    assert_eq!(body_a, body_b);
}
