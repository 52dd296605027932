// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Blog, media, catalog, achievements and activity logs against the fake
//! backend.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

mod common;

const BOUNDARY: &str = "console-test-boundary";

fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

async fn upload(
    app: &axum::Router,
    token: &str,
    body: Vec<u8>,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/agent/upload-image")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or_default())
}

#[tokio::test]
async fn test_image_upload_stored_under_generated_name() {
    let backend = common::FakeBackend::spawn().await;
    let (app, _) = common::create_test_app(&backend);
    let token = common::agent_token();

    let (status, body) = upload(
        &app,
        &token,
        multipart_body("file", "Holiday Photo.PNG", "image/png", b"\x89PNG fake image"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let uploads = backend.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].bucket, "blog_media");
    assert_eq!(uploads[0].content_type, "image/png");
    assert_eq!(uploads[0].size, 15);
    assert!(uploads[0].path.ends_with(".png"));
    assert!(!uploads[0].path.contains("Holiday"));

    let expected = format!(
        "{}/storage/v1/object/public/blog_media/{}",
        backend.url, uploads[0].path
    );
    assert_eq!(body["url"], expected);
}

#[tokio::test]
async fn test_upload_rejects_non_images_and_missing_file() {
    let backend = common::FakeBackend::spawn().await;
    let (app, _) = common::create_test_app(&backend);
    let token = common::agent_token();

    let (status, _) = upload(
        &app,
        &token,
        multipart_body("file", "notes.txt", "text/plain", b"hello"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = upload(
        &app,
        &token,
        multipart_body("attachment", "cat.jpg", "image/jpeg", b"jpeg"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "No file uploaded");

    assert!(backend.uploads().is_empty());
}

#[tokio::test]
async fn test_upload_size_boundary() {
    let backend = common::FakeBackend::spawn().await;
    let (app, _) = common::create_test_app(&backend);
    let token = common::agent_token();
    let limit = agent_console::routes::media::MAX_UPLOAD_BYTES;

    let (status, _) = upload(
        &app,
        &token,
        multipart_body("file", "full.png", "image/png", &vec![7u8; limit]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(backend.uploads()[0].size, limit);

    let (status, body) = upload(
        &app,
        &token,
        multipart_body("file", "over.png", "image/png", &vec![7u8; limit + 1]),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "payload_too_large");
    assert_eq!(backend.uploads().len(), 1);
}

#[tokio::test]
async fn test_blog_post_lifecycle() {
    let backend = common::FakeBackend::spawn().await;
    backend.seed(
        "blog_posts",
        vec![json!({ "id": "post-1", "title": "Hello", "content": "World", "is_published": false })],
    );
    let (app, _) = common::create_test_app(&backend);
    let token = common::agent_token();

    let (status, body) = common::send(
        &app,
        Method::POST,
        "/api/agent/blog/create",
        Some(&token),
        Some(json!({ "title": " Launch ", "content": "We are live", "cover_image_url": " " })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["p_title"], "Launch");
    assert!(body["p_cover_image_url"].is_null());

    let (status, body) =
        common::send(&app, Method::GET, "/api/agent/blog/post-1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Hello");

    let (status, _) =
        common::send(&app, Method::DELETE, "/api/agent/blog/post-1", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) =
        common::send(&app, Method::GET, "/api/agent/blog/post-1", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) =
        common::send(&app, Method::DELETE, "/api/agent/blog/post-1", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["details"], "Blog post not found or not authorized to delete.");
}

#[tokio::test]
async fn test_publish_calls_procedure() {
    let backend = common::FakeBackend::spawn().await;
    let (app, _) = common::create_test_app(&backend);
    let token = common::agent_token();

    let (status, _) = common::send(
        &app,
        Method::POST,
        "/api/agent/blog/post-7/publish",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        backend.rpc_calls("publish_blog_post"),
        vec![json!({ "p_post_id": "post-7" })]
    );
}

#[tokio::test]
async fn test_interests_bulk_add_and_delete() {
    let backend = common::FakeBackend::spawn().await;
    let (app, _) = common::create_test_app(&backend);
    let token = common::agent_token();

    let (status, body) = common::send(
        &app,
        Method::POST,
        "/api/interests",
        Some(&token),
        Some(json!({ "names": "Travel, Food , ,Tech" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = common::send(&app, Method::GET, "/api/interests", Some(&token), None).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["interest_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Food", "Tech", "Travel"]);
    assert!(body[0]["is_active"].as_bool().unwrap());

    let id = body[0]["id"].as_str().unwrap().to_string();
    let (status, _) = common::send(
        &app,
        Method::DELETE,
        &format!("/api/interests/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(backend.rows("interests").len(), 2);
}

#[tokio::test]
async fn test_industry_update_missing_row() {
    let backend = common::FakeBackend::spawn().await;
    let (app, _) = common::create_test_app(&backend);
    let token = common::agent_token();

    let (status, body) = common::send(
        &app,
        Method::PUT,
        "/api/industries/nope",
        Some(&token),
        Some(json!({ "name": "Retail", "is_active": true })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["details"], "Industry not found");
}

#[tokio::test]
async fn test_achievement_update_ignores_body_id() {
    let backend = common::FakeBackend::spawn().await;
    backend.seed(
        "achievement_definitions",
        vec![
            json!({ "id": "ach-2", "action_type": "post", "threshold": 10, "reward_coins": 50 }),
            json!({ "id": "ach-1", "action_type": "post", "threshold": 1, "reward_coins": 5 }),
        ],
    );
    let (app, _) = common::create_test_app(&backend);
    let token = common::agent_token();

    let (_, body) = common::send(&app, Method::GET, "/api/achievements", Some(&token), None).await;
    assert_eq!(body[0]["id"], "ach-1");

    let (status, body) = common::send(
        &app,
        Method::PUT,
        "/api/achievements/ach-2",
        Some(&token),
        Some(json!({ "id": "hijack", "reward_coins": 75 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "ach-2");
    assert_eq!(body["reward_coins"], 75);

    let (status, _) = common::send(
        &app,
        Method::PUT,
        "/api/achievements/ach-2",
        Some(&token),
        Some(json!({ "id": "ach-2" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

fn seed_logs(backend: &common::FakeBackend) {
    backend.seed(
        "activity_logs",
        vec![
            json!({
                "id": "l1", "timestamp": "2025-01-01T10:00:00Z", "user_id": "u-1",
                "user_type": "brand", "action_type": "login"
            }),
            json!({
                "id": "l2", "timestamp": "2025-01-02T10:00:00Z", "user_id": "u-2",
                "user_type": "influencer", "action_type": "purchase",
                "details": { "coins": 20 }
            }),
            json!({
                "id": "l3", "timestamp": "2025-01-03T10:00:00Z", "user_id": "u-1",
                "user_type": "brand", "action_type": "purchase"
            }),
        ],
    );
    backend.seed(
        "profiles",
        vec![
            json!({ "id": "u-1", "full_name": "Acme", "email": "ops@acme.test" }),
            json!({ "id": "u-2", "full_name": null, "username": null, "email": "zoe@example.com" }),
        ],
    );
}

#[tokio::test]
async fn test_activity_logs_joined_and_filtered() {
    let backend = common::FakeBackend::spawn().await;
    seed_logs(&backend);
    let (app, _) = common::create_test_app(&backend);
    let token = common::agent_token();

    let (status, body) =
        common::send(&app, Method::GET, "/api/activity-logs", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["logs"][0]["id"], "l3", "newest first");
    assert_eq!(body["logs"][0]["display_name"], "Acme");
    assert_eq!(body["logs"][1]["display_name"], "zoe");
    assert_eq!(body["action_types"], json!(["purchase", "login"]));
    assert_eq!(body["user_types"], json!(["brand", "influencer"]));

    let (_, body) = common::send(
        &app,
        Method::GET,
        "/api/activity-logs?action_type=purchase&user_type=brand",
        Some(&token),
        None,
    )
    .await;
    let ids: Vec<&str> = body["logs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["l3"]);
    // Filter menus still list every value.
    assert_eq!(body["action_types"], json!(["purchase", "login"]));
}

#[tokio::test]
async fn test_activity_logs_without_profiles() {
    let backend = common::FakeBackend::spawn().await;
    seed_logs(&backend);
    backend.fail_table("profiles");
    let (app, _) = common::create_test_app(&backend);
    let token = common::agent_token();

    let (status, body) = common::send(
        &app,
        Method::GET,
        "/api/activity-logs?action_type=all",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["logs"].as_array().unwrap().len(), 3);
    assert!(body["logs"][0]["profile"].is_null());
    assert_eq!(body["logs"][0]["display_name"], "User u-1");
}
