//! Router-level tests that must succeed without any database access:
//! authentication rejections and upload validation happen before the first
//! repository call.

mod helpers;

use http::StatusCode;
use uuid::Uuid;

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = helpers::TestApp::stateless().await;

    for (method, path) in [
        ("GET", "/api/auth/me"),
        ("GET", "/api/projects"),
        ("POST", "/api/projects"),
        ("GET", &format!("/api/projects/{}/versions", Uuid::new_v4())[..]),
    ] {
        let response = app.request(method, path, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{method} {path}");
        assert_eq!(response.body["error"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let app = helpers::TestApp::stateless().await;

    let response = app
        .request("GET", "/api/projects", None, Some("not-a-real-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_disallowed_extension_rejected_before_any_backend_call() {
    let app = helpers::TestApp::stateless().await;
    let token = app.issue_token(Uuid::new_v4(), "uploader@example.com");

    // The pool is lazy and never connects: a 400 here proves the extension
    // check fires before storage or database are touched.
    let response = app
        .upload(
            &format!("/api/projects/{}/versions", Uuid::new_v4()),
            "malware.exe",
            b"MZ...",
            None,
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_upload_empty_file_rejected() {
    let app = helpers::TestApp::stateless().await;
    let token = app.issue_token(Uuid::new_v4(), "uploader@example.com");

    let response = app
        .upload(
            &format!("/api/projects/{}/versions", Uuid::new_v4()),
            "empty.txt",
            b"",
            None,
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_without_extension_rejected() {
    let app = helpers::TestApp::stateless().await;
    let token = app.issue_token(Uuid::new_v4(), "uploader@example.com");

    let response = app
        .upload(
            &format!("/api/projects/{}/versions", Uuid::new_v4()),
            "noext",
            b"data",
            Some("just a note"),
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_health_endpoint_reports_storage_provider() {
    let app = helpers::TestApp::stateless().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["storage_provider"], "local");
    assert_eq!(response.body["storage"], true);
}
