//! Submission endpoint integration tests.
//!
//! Run with: `cargo test -p galley-api --test submissions_test`

mod helpers;

use helpers::{setup_test_app, valid_payload};

#[tokio::test]
async fn test_submit_and_read_back() {
    let app = setup_test_app().await;

    let mut payload = valid_payload();
    payload["article_files"] = serde_json::json!([
        "http://localhost:3000/files/article-documents/z.pdf",
        "http://localhost:3000/files/article-documents/a.pdf"
    ]);

    let response = app.server.post("/api/v0/articles").json(&payload).await;
    assert_eq!(response.status_code(), 201);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "pending");
    let id = body["id"].as_str().unwrap().to_string();

    let fetched: serde_json::Value = app
        .server
        .get(&format!("/api/v0/articles/{}", id))
        .await
        .json();

    // The stored URL lists round-trip exactly: no reordering, no dedup.
    assert_eq!(fetched["article_files"], payload["article_files"]);
    assert_eq!(fetched["title"], payload["title"]);
}

#[tokio::test]
async fn test_submit_without_files_fails_with_files_key() {
    let app = setup_test_app().await;

    let mut payload = valid_payload();
    payload["article_files"] = serde_json::json!([]);

    let response = app.server.post("/api/v0/articles").json(&payload).await;
    assert_eq!(response.status_code(), 400);

    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["fields"]["files"].is_string());
    // Nothing reached the store.
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_submit_print_track_requires_cover() {
    let app = setup_test_app().await;

    let mut payload = valid_payload();
    payload["track"] = serde_json::json!("rhca");

    let response = app.server.post("/api/v0/articles").json(&payload).await;
    assert_eq!(response.status_code(), 400);

    let body: serde_json::Value = response.json();
    assert!(body["fields"]["cover_image"].is_string());

    payload["cover_image_url"] =
        serde_json::json!("http://localhost:3000/files/article-covers/cover.jpg");
    let response = app.server.post("/api/v0/articles").json(&payload).await;
    assert_eq!(response.status_code(), 201);
}

#[tokio::test]
async fn test_submit_metadata_bounds() {
    let app = setup_test_app().await;

    let mut payload = valid_payload();
    payload["title"] = serde_json::json!("ab");
    payload["corresponding_email"] = serde_json::json!("not-an-email");

    let response = app.server.post("/api/v0/articles").json(&payload).await;
    assert_eq!(response.status_code(), 400);

    let body: serde_json::Value = response.json();
    assert!(body["fields"]["title"].is_string());
    assert!(body["fields"]["email"].is_string());
}

#[tokio::test]
async fn test_duplicate_title_is_409_with_title_field() {
    let app = setup_test_app().await;

    let payload = valid_payload();
    let response = app.server.post("/api/v0/articles").json(&payload).await;
    assert_eq!(response.status_code(), 201);

    let response = app.server.post("/api/v0/articles").json(&payload).await;
    assert_eq!(response.status_code(), 409);

    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "TITLE_CONFLICT");
    assert!(body["fields"]["title"].is_string());
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn test_get_unknown_article_is_404() {
    let app = setup_test_app().await;

    let response = app
        .server
        .get(&format!("/api/v0/articles/{}", uuid::Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), 404);

    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);
}
