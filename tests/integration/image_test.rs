//! Integration tests for image upload and lifecycle.

use axum::body::Body;
use axum::http::{Request, StatusCode};

use crate::helpers::{Part, TestApp};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-bytes";

#[tokio::test]
async fn test_upload_to_root_stores_blob() {
    let app = TestApp::new().await;
    let alice = app.signup("Alice", "alice@example.com").await;

    let response = app
        .upload(
            &alice,
            &[
                Part::Text("name", "Banner"),
                Part::File("image", "banner.PNG", PNG),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["name"], "Banner");
    assert!(response.body["folderId"].is_null());

    let filename = response.body["filename"].as_str().expect("filename");
    assert!(filename.ends_with(".PNG"));
    assert_eq!(response.body["url"], format!("/uploads/{filename}"));
    assert_eq!(app.blob_files(), vec![filename.to_string()]);

    let served = app
        .send(
            Request::builder()
                .uri(format!("/uploads/{filename}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(served.status, StatusCode::OK);

    let root = app
        .request("GET", "/api/folders/root", None, Some(&alice))
        .await;
    assert_eq!(root.names("images"), vec!["Banner"]);
}

#[tokio::test]
async fn test_empty_name_rejected_before_storage() {
    let app = TestApp::new().await;
    let alice = app.signup("Alice", "alice@example.com").await;

    let response = app
        .upload(
            &alice,
            &[Part::Text("name", ""), Part::File("image", "x.png", PNG)],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Name required");
    assert!(app.blob_files().is_empty());

    let root = app
        .request("GET", "/api/folders/root", None, Some(&alice))
        .await;
    assert!(root.names("images").is_empty());
}

#[tokio::test]
async fn test_upload_requires_file() {
    let app = TestApp::new().await;
    let alice = app.signup("Alice", "alice@example.com").await;

    let response = app.upload(&alice, &[Part::Text("name", "Nothing")]).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Image file required");
    assert!(app.blob_files().is_empty());
}

#[tokio::test]
async fn test_non_multipart_upload_rejected() {
    let app = TestApp::new().await;
    let alice = app.signup("Alice", "alice@example.com").await;

    let response = app
        .request_raw(
            "POST",
            "/api/images",
            Some("application/json"),
            r#"{"name":"cat"}"#,
            &alice,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "BAD_REQUEST");
    assert!(response.message().starts_with("Invalid multipart body"));
    assert!(app.blob_files().is_empty());
}

#[tokio::test]
async fn test_upload_into_folder_checks_ownership() {
    let app = TestApp::new().await;
    let alice = app.signup("Alice", "alice@example.com").await;
    let bob = app.signup("Bob", "bob@example.com").await;
    let folder = app.create_folder(&alice, "Assets", None).await;

    let own = app
        .upload(
            &alice,
            &[
                Part::Text("name", "Logo"),
                Part::Text("folderId", &folder),
                Part::File("image", "logo.jpg", PNG),
            ],
        )
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["folderId"], folder.as_str());

    let listing = app
        .request("GET", &format!("/api/folders/{folder}"), None, Some(&alice))
        .await;
    assert_eq!(listing.names("images"), vec!["Logo"]);

    let foreign = app
        .upload(
            &bob,
            &[
                Part::Text("name", "Sneaky"),
                Part::Text("folderId", &folder),
                Part::File("image", "sneaky.jpg", PNG),
            ],
        )
        .await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);
    assert_eq!(foreign.message(), "Not allowed");

    let missing = app
        .upload(
            &alice,
            &[
                Part::Text("name", "Lost"),
                Part::Text("folderId", &uuid::Uuid::new_v4().to_string()),
                Part::File("image", "lost.jpg", PNG),
            ],
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.message(), "Folder not found");

    assert_eq!(app.blob_files().len(), 1);
}

#[tokio::test]
async fn test_delete_restore_and_share_image() {
    let app = TestApp::new().await;
    let alice = app.signup("Alice", "alice@example.com").await;
    let bob = app.signup("Bob", "bob@example.com").await;

    let image = app
        .upload(
            &alice,
            &[
                Part::Text("name", "Poster"),
                Part::File("image", "poster.webp", PNG),
            ],
        )
        .await
        .id();

    let shared = app
        .request(
            "POST",
            &format!("/api/images/share/{image}"),
            Some(serde_json::json!({ "email": "bob@example.com" })),
            Some(&alice),
        )
        .await;
    assert_eq!(shared.status, StatusCode::OK);

    let bob_root = app.request("GET", "/api/folders/root", None, Some(&bob)).await;
    assert_eq!(bob_root.names("images"), vec!["Poster"]);

    let bob_delete = app
        .request(
            "POST",
            &format!("/api/images/delete/{image}"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(bob_delete.status, StatusCode::FORBIDDEN);

    let deleted = app
        .request(
            "POST",
            &format!("/api/images/delete/{image}"),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let twice = app
        .request(
            "POST",
            &format!("/api/images/delete/{image}"),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(twice.status, StatusCode::NOT_FOUND);

    let bob_root = app.request("GET", "/api/folders/root", None, Some(&bob)).await;
    assert!(bob_root.names("images").is_empty());

    let restored = app
        .request(
            "POST",
            &format!("/api/images/restore/{image}"),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(restored.status, StatusCode::OK);

    let unshared = app
        .request(
            "POST",
            &format!("/api/images/unshare/{image}"),
            Some(serde_json::json!({ "email": "bob@example.com" })),
            Some(&alice),
        )
        .await;
    assert_eq!(unshared.status, StatusCode::OK);

    let bob_root = app.request("GET", "/api/folders/root", None, Some(&bob)).await;
    assert!(bob_root.names("images").is_empty());
    let alice_root = app
        .request("GET", "/api/folders/root", None, Some(&alice))
        .await;
    assert_eq!(alice_root.names("images"), vec!["Poster"]);
}
