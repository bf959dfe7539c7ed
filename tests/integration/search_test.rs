//! Integration tests for image search.

use axum::http::StatusCode;

use crate::helpers::{Part, TestApp};

#[tokio::test]
async fn test_search_scopes_to_visible_images() {
    let app = TestApp::new().await;
    let alice = app.signup("Alice", "alice@example.com").await;
    let bob = app.signup("Bob", "bob@example.com").await;

    for name in ["Summer Sale", "Winter sale", "Logo"] {
        let response = app
            .upload(
                &alice,
                &[Part::Text("name", name), Part::File("image", "a.png", b"data")],
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }
    app.upload(
        &bob,
        &[Part::Text("name", "Bob's sale"), Part::File("image", "b.png", b"data")],
    )
    .await;

    let hits = app
        .request("GET", "/api/images/search?q=SALE", None, Some(&alice))
        .await;
    assert_eq!(hits.status, StatusCode::OK);
    let mut names = hits.names("");
    names.sort();
    assert_eq!(names, vec!["Summer Sale", "Winter sale"]);

    let blank = app
        .request("GET", "/api/images/search?q=", None, Some(&alice))
        .await;
    assert_eq!(blank.status, StatusCode::OK);
    assert!(blank.names("").is_empty());

    let wildcard = app
        .request("GET", "/api/images/search?q=%25", None, Some(&alice))
        .await;
    assert!(wildcard.names("").is_empty());
}
