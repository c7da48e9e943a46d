//! End-to-end tests for the upload commit workflow and the project/user
//! directory. These need a live PostgreSQL (set
//! `COLLABTRACK_TEST_DATABASE_URL`), so they are `#[ignore]`d by default:
//!
//! ```sh
//! cargo test -- --ignored
//! ```

mod helpers;

use http::StatusCode;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_register_login_me() {
    let app = helpers::TestApp::with_database().await;
    let (user_id, token) = app.register_and_login("alice@example.com", "password123").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], user_id.to_string());
    assert_eq!(response.body["data"]["email"], "alice@example.com");
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_email_conflicts() {
    let app = helpers::TestApp::with_database().await;
    app.register_and_login("bob@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({ "email": "bob@example.com", "password": "password456" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_wrong_password_rejected() {
    let app = helpers::TestApp::with_database().await;
    app.register_and_login("carol@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "carol@example.com", "password": "wrong" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // Unknown email gets the same response shape.
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "nobody@example.com", "password": "wrong" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_version_numbers_are_gapless_from_one() {
    let app = helpers::TestApp::with_database().await;
    let (_, token) = app.register_and_login("dave@example.com", "password123").await;
    let project_id = app.create_project("Bridge", &token).await;

    let path = format!("/api/projects/{project_id}/versions");
    for expected in 1..=4 {
        let response = app
            .upload(&path, "plan.dwg", b"drawing revision", Some("rev"), &token)
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["data"]["version_number"], expected);
    }

    // Listing returns newest first.
    let response = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let numbers: Vec<i64> = response.body["data"]
        .as_array()
        .expect("versions array")
        .iter()
        .map(|v| v["version_number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![4, 3, 2, 1]);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_same_filename_never_collides_storage_keys() {
    let app = helpers::TestApp::with_database().await;
    let (_, token) = app.register_and_login("erin@example.com", "password123").await;
    let project_id = app.create_project("Tower", &token).await;

    let path = format!("/api/projects/{project_id}/versions");
    let r1 = app.upload(&path, "model.dxf", b"v1", None, &token).await;
    let r2 = app.upload(&path, "model.dxf", b"v2", None, &token).await;

    let key1 = r1.body["data"]["storage_key"].as_str().unwrap().to_string();
    let key2 = r2.body["data"]["storage_key"].as_str().unwrap().to_string();
    assert_ne!(key1, key2);
    assert!(key1.starts_with(&format!("projects/{project_id}/")));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_storage_failure_writes_no_version_row() {
    let app = helpers::TestApp::with_database_and_broken_store().await;
    let (_, token) = app.register_and_login("frank@example.com", "password123").await;
    let project_id = app.create_project("Doomed", &token).await;

    let response = app
        .upload(
            &format!("/api/projects/{project_id}/versions"),
            "plan.pdf",
            b"content",
            None,
            &token,
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM versions WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(&app.db_pool)
            .await
            .expect("count versions");
    assert_eq!(count, 0);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_foreign_project_is_not_found() {
    let app = helpers::TestApp::with_database().await;
    let (_, owner_token) = app.register_and_login("owner@example.com", "password123").await;
    let project_id = app.create_project("Private", &owner_token).await;

    let (_, other_token) = app.register_and_login("other@example.com", "password123").await;

    // Fetch, version listing, and upload all report not-found, never 403.
    let response = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}"),
            None,
            Some(&other_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .upload(
            &format!("/api/projects/{project_id}/versions"),
            "sneaky.txt",
            b"intrusion",
            None,
            &other_token,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // And a genuinely missing project looks identical.
    let response = app
        .request(
            "GET",
            &format!("/api/projects/{}", Uuid::new_v4()),
            None,
            Some(&other_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_version_number_rejected_by_database() {
    let app = helpers::TestApp::with_database().await;
    let (user_id, token) = app.register_and_login("heidi@example.com", "password123").await;
    let project_id = app.create_project("Backstop", &token).await;

    let insert = "INSERT INTO versions \
                  (id, project_id, uploader_id, version_number, storage_key, file_name) \
                  VALUES ($1, $2, $3, $4, $5, $6)";
    sqlx::query(insert)
        .bind(Uuid::new_v4())
        .bind(project_id)
        .bind(user_id)
        .bind(1_i32)
        .bind(format!("projects/{project_id}/first"))
        .bind("first.txt")
        .execute(&app.db_pool)
        .await
        .expect("first insert");

    let err = sqlx::query(insert)
        .bind(Uuid::new_v4())
        .bind(project_id)
        .bind(user_id)
        .bind(1_i32)
        .bind(format!("projects/{project_id}/second"))
        .bind("second.txt")
        .execute(&app.db_pool)
        .await
        .expect_err("duplicate version number must be rejected");
    assert!(
        err.as_database_error()
            .expect("database error")
            .is_unique_violation()
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_upload_retries_past_competing_insert() {
    let app = helpers::TestApp::with_database().await;
    let (user_id, token) = app.register_and_login("ivan@example.com", "password123").await;
    let project_id = app.create_project("Contended", &token).await;

    // An uncommitted competing insert claims version 1. The upload's insert
    // blocks on the unique index until the competitor commits, then fails
    // with a unique violation and is retried with the next number.
    let mut tx = app.db_pool.begin().await.expect("begin");
    sqlx::query(
        "INSERT INTO versions \
         (id, project_id, uploader_id, version_number, storage_key, file_name) \
         VALUES ($1, $2, $3, 1, $4, 'competitor.txt')",
    )
    .bind(Uuid::new_v4())
    .bind(project_id)
    .bind(user_id)
    .bind(format!("projects/{project_id}/competitor"))
    .execute(&mut *tx)
    .await
    .expect("competing insert");

    let path = format!("/api/projects/{project_id}/versions");
    let upload = app.upload(&path, "late.txt", b"second writer", None, &token);
    let release = async {
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        tx.commit().await.expect("commit competitor");
    };
    let (response, ()) = tokio::join!(upload, release);

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["version_number"], 2);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_concurrent_uploads_allocate_distinct_gapless_numbers() {
    let app = helpers::TestApp::with_database().await;
    let (_, token) = app.register_and_login("judy@example.com", "password123").await;
    let project_id = app.create_project("Busy", &token).await;

    let path = format!("/api/projects/{project_id}/versions");
    let (r1, r2, r3) = tokio::join!(
        app.upload(&path, "a.txt", b"one", None, &token),
        app.upload(&path, "b.txt", b"two", None, &token),
        app.upload(&path, "c.txt", b"three", None, &token),
    );

    let mut numbers: Vec<i64> = [&r1, &r2, &r3]
        .iter()
        .map(|r| {
            assert_eq!(r.status, StatusCode::CREATED);
            r.body["data"]["version_number"].as_i64().expect("number")
        })
        .collect();
    numbers.sort_unstable();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_download_returns_uploaded_content() {
    let app = helpers::TestApp::with_database().await;
    let (_, token) = app.register_and_login("grace@example.com", "password123").await;
    let project_id = app.create_project("Docs", &token).await;

    app.upload(
        &format!("/api/projects/{project_id}/versions"),
        "notes.txt",
        b"the first revision",
        None,
        &token,
    )
    .await;

    let response = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/versions/1/download"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(&response.raw[..], b"the first revision");
}
