//! Integration tests for the folder tree, sharing, and soft-delete.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_share_then_delete_visibility() {
    let app = TestApp::new().await;
    let alice = app.signup("Alice", "alice@example.com").await;
    let bob = app.signup("Bob", "bob@example.com").await;

    let folder = app.create_folder(&alice, "Campaigns", None).await;
    let path = format!("/api/folders/{folder}");

    let denied = app.request("GET", &path, None, Some(&bob)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.message(), "No access");

    let shared = app
        .request(
            "POST",
            &format!("/api/folders/share/{folder}"),
            Some(serde_json::json!({ "email": "bob@example.com" })),
            Some(&alice),
        )
        .await;
    assert_eq!(shared.status, StatusCode::OK);
    assert_eq!(shared.body["ok"], true);

    let visible = app.request("GET", &path, None, Some(&bob)).await;
    assert_eq!(visible.status, StatusCode::OK);
    assert_eq!(visible.body["current"]["name"], "Campaigns");

    let not_owner = app
        .request(
            "POST",
            &format!("/api/folders/delete/{folder}"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(not_owner.status, StatusCode::FORBIDDEN);
    assert_eq!(not_owner.message(), "Owner only");

    let deleted = app
        .request(
            "POST",
            &format!("/api/folders/delete/{folder}"),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app.request("GET", &path, None, Some(&bob)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.message(), "Not found");
}

#[tokio::test]
async fn test_nested_listing_and_breadcrumbs() {
    let app = TestApp::new().await;
    let alice = app.signup("Alice", "alice@example.com").await;

    let a = app.create_folder(&alice, "A", None).await;
    let b = app.create_folder(&alice, "B", Some(&a)).await;
    let c = app.create_folder(&alice, "C", Some(&b)).await;

    let crumbs = app
        .request(
            "GET",
            &format!("/api/folders/breadcrumbs/{c}"),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(crumbs.status, StatusCode::OK);
    assert_eq!(crumbs.names(""), vec!["A", "B", "C"]);
    assert_eq!(crumbs.body[0]["id"], a.as_str());

    let listing = app
        .request("GET", &format!("/api/folders/{a}"), None, Some(&alice))
        .await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.names("folders"), vec!["B"]);
    assert_eq!(listing.body["current"]["path"].as_array().map(Vec::len), Some(0));

    let child = app
        .request("GET", &format!("/api/folders/{c}"), None, Some(&alice))
        .await;
    assert_eq!(child.body["current"]["path"][0], a.as_str());
    assert_eq!(child.body["current"]["path"][1], b.as_str());

    let root = app
        .request("GET", "/api/folders/root", None, Some(&alice))
        .await;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(root.names("folders"), vec!["A"]);
    assert!(root.body["images"].as_array().is_some_and(|i| i.is_empty()));
}

#[tokio::test]
async fn test_shared_viewer_breadcrumbs_only_show_the_folder() {
    let app = TestApp::new().await;
    let alice = app.signup("Alice", "alice@example.com").await;
    let bob = app.signup("Bob", "bob@example.com").await;

    let parent = app.create_folder(&alice, "Private", None).await;
    let child = app.create_folder(&alice, "Public", Some(&parent)).await;
    app.request(
        "POST",
        &format!("/api/folders/share/{child}"),
        Some(serde_json::json!({ "email": "bob@example.com" })),
        Some(&alice),
    )
    .await;

    let crumbs = app
        .request(
            "GET",
            &format!("/api/folders/breadcrumbs/{child}"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(crumbs.status, StatusCode::OK);
    assert_eq!(crumbs.names(""), vec!["Public"]);

    let root = app.request("GET", "/api/folders/root", None, Some(&bob)).await;
    assert!(root.names("folders").is_empty());
}

#[tokio::test]
async fn test_create_folder_validation_and_conflicts() {
    let app = TestApp::new().await;
    let alice = app.signup("Alice", "alice@example.com").await;
    let bob = app.signup("Bob", "bob@example.com").await;

    let blank = app
        .request(
            "POST",
            "/api/folders",
            Some(serde_json::json!({ "name": "   " })),
            Some(&alice),
        )
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.message(), "Name required");

    let docs = app.create_folder(&alice, "Docs", None).await;

    let duplicate = app
        .request(
            "POST",
            "/api/folders",
            Some(serde_json::json!({ "name": "Docs" })),
            Some(&alice),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.message(), "Folder with same name already exists here");

    // Same name for another owner is fine.
    app.create_folder(&bob, "Docs", None).await;

    let missing_parent = app
        .request(
            "POST",
            "/api/folders",
            Some(serde_json::json!({
                "name": "Nested",
                "parentId": uuid::Uuid::new_v4(),
            })),
            Some(&alice),
        )
        .await;
    assert_eq!(missing_parent.status, StatusCode::NOT_FOUND);
    assert_eq!(missing_parent.message(), "Parent not found");

    let foreign_parent = app
        .request(
            "POST",
            "/api/folders",
            Some(serde_json::json!({ "name": "Intruder", "parentId": docs })),
            Some(&bob),
        )
        .await;
    assert_eq!(foreign_parent.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_restore_folder() {
    let app = TestApp::new().await;
    let alice = app.signup("Alice", "alice@example.com").await;
    let folder = app.create_folder(&alice, "Archive", None).await;

    app.request(
        "POST",
        &format!("/api/folders/delete/{folder}"),
        None,
        Some(&alice),
    )
    .await;
    let root = app
        .request("GET", "/api/folders/root", None, Some(&alice))
        .await;
    assert!(root.names("folders").is_empty());

    let restored = app
        .request(
            "POST",
            &format!("/api/folders/restore/{folder}"),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(restored.status, StatusCode::OK);

    let again = app
        .request(
            "POST",
            &format!("/api/folders/restore/{folder}"),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(again.status, StatusCode::OK);

    let root = app
        .request("GET", "/api/folders/root", None, Some(&alice))
        .await;
    assert_eq!(root.names("folders"), vec!["Archive"]);
}

#[tokio::test]
async fn test_share_errors() {
    let app = TestApp::new().await;
    let alice = app.signup("Alice", "alice@example.com").await;
    let folder = app.create_folder(&alice, "Shared", None).await;

    let unknown = app
        .request(
            "POST",
            &format!("/api/folders/share/{folder}"),
            Some(serde_json::json!({ "email": "ghost@example.com" })),
            Some(&alice),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.message(), "User not found");

    let malformed = app
        .request(
            "POST",
            "/api/folders/share/not-a-uuid",
            Some(serde_json::json!({ "email": "alice@example.com" })),
            Some(&alice),
        )
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_unshare_revokes_access() {
    let app = TestApp::new().await;
    let alice = app.signup("Alice", "alice@example.com").await;
    let bob = app.signup("Bob", "bob@example.com").await;
    let folder = app.create_folder(&alice, "Team", None).await;

    for action in ["share", "unshare"] {
        let response = app
            .request(
                "POST",
                &format!("/api/folders/{action}/{folder}"),
                Some(serde_json::json!({ "email": "bob@example.com" })),
                Some(&alice),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let denied = app
        .request("GET", &format!("/api/folders/{folder}"), None, Some(&bob))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_malformed_bodies_use_error_shape() {
    let app = TestApp::new().await;
    let alice = app.signup("Alice", "alice@example.com").await;
    let folder = app.create_folder(&alice, "Team", None).await;

    let garbled = app
        .request_raw(
            "POST",
            "/api/folders",
            Some("application/json"),
            "{not json",
            &alice,
        )
        .await;
    assert_eq!(garbled.status, StatusCode::BAD_REQUEST);
    assert_eq!(garbled.body["error"], "BAD_REQUEST");
    assert!(garbled.message().starts_with("Invalid JSON"));

    let untyped = app
        .request_raw(
            "POST",
            &format!("/api/folders/share/{folder}"),
            None,
            r#"{"email":"bob@example.com"}"#,
            &alice,
        )
        .await;
    assert_eq!(untyped.status, StatusCode::BAD_REQUEST);
    assert_eq!(untyped.body["error"], "BAD_REQUEST");
    assert!(untyped.message().starts_with("Invalid JSON"));
}
