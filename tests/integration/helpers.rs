//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use katla_core::config::AppConfig;
use katla_core::types::HiveId;
use katla_database::store::MemoryHiveSectionStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct inspection
    pub store: MemoryHiveSectionStore,
}

impl TestApp {
    /// Create a test application whose store knows the given hives
    pub fn new(hives: &[i32]) -> Self {
        let mut config = AppConfig::default();
        config.identity.default_user_id = 1;

        let store = MemoryHiveSectionStore::with_hives(hives.iter().copied().map(HiveId));
        let state = katla_api::AppState::new(config, Arc::new(store.clone()));
        let router = katla_api::build_app(state);

        Self { router, store }
    }

    /// Create a section through the API and return its ID
    pub async fn create_section(&self, code: &str, hive_id: i32) -> i64 {
        let body = serde_json::json!({
            "name": format!("Section {code}"),
            "code": code,
            "storeHiveId": hive_id,
        });

        let response = self.request("POST", "/api/sections", Some(body), None).await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );

        response.body["data"]["id"]
            .as_i64()
            .expect("No id in create response")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user_id: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(user_id) = user_id {
            req = req.header("X-User-Id", user_id);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let location = response
            .headers()
            .get(http::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            location,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// `Location` header, if any
    pub location: Option<String>,
    /// Parsed JSON body
    pub body: Value,
}
