//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use dobby_api::AppState;
use dobby_core::config::{AppConfig, DatabaseBackend};
use dobby_database::Stores;

const BOUNDARY: &str = "dobby-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Directory backing the local blob store
    pub blob_dir: TempDir,
}

/// A part of a multipart upload body
pub enum Part<'a> {
    /// Plain text field
    Text(&'a str, &'a str),
    /// File field with a file name and bytes
    File(&'a str, &'a str, &'a [u8]),
}

impl TestApp {
    /// Create a new test application over fresh in-memory stores
    pub async fn new() -> Self {
        let blob_dir = TempDir::new().expect("Failed to create blob dir");

        let mut config = AppConfig::default();
        config.database.backend = DatabaseBackend::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.storage.local.root_path = blob_dir.path().to_string_lossy().into_owned();

        let blobs = dobby_storage::build_blob_store(&config.storage)
            .await
            .expect("Failed to init blob store");
        let stores = Stores::memory();

        let router = dobby_api::build_app(AppState::new(config, &stores, blobs));

        Self { router, blob_dir }
    }

    /// Sign up a user and return their session token
    pub async fn signup(&self, name: &str, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/signup",
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": "Passw0rd!",
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Signup failed: {:?}",
            response.body
        );

        response
            .body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in signup response")
            .to_string()
    }

    /// Create a folder and return its id
    pub async fn create_folder(&self, token: &str, name: &str, parent_id: Option<&str>) -> String {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": name, "parentId": parent_id })),
                Some(token),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Create folder failed: {:?}",
            response.body
        );
        response.id()
    }

    /// Make a JSON request to the test app, authenticating with a Bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a raw body with an optional content type, authenticating with a Bearer token
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        content_type: Option<&str>,
        body: &str,
        token: &str,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Authorization", format!("Bearer {}", token));

        if let Some(content_type) = content_type {
            req = req.header("Content-Type", content_type);
        }

        let req = req
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload a multipart body to `POST /api/images`
    pub async fn upload(&self, token: &str, parts: &[Part<'_>]) -> TestResponse {
        let mut body: Vec<u8> = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, file_name, data) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(data);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/images")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prebuilt request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Names of the files currently in the blob directory
    pub fn blob_files(&self) -> Vec<String> {
        std::fs::read_dir(self.blob_dir.path())
            .expect("Failed to read blob dir")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `id` field of the body
    pub fn id(&self) -> String {
        self.body
            .get("id")
            .and_then(|v| v.as_str())
            .expect("No id in response")
            .to_string()
    }

    /// The `message` field of an error body
    pub fn message(&self) -> &str {
        self.body
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
    }

    /// Names of the entries in an array field of the body
    pub fn names(&self, field: &str) -> Vec<String> {
        let list = if field.is_empty() {
            &self.body
        } else {
            &self.body[field]
        };
        list.as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|i| i.get("name").and_then(|n| n.as_str()))
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}
