//! Integration tests for hive section endpoints.

use http::StatusCode;
use serde_json::json;

use katla_core::types::{HiveSectionId, UserId};
use katla_database::store::HiveSectionStore;

use crate::helpers::TestApp;

fn section_body(code: &str, hive_id: i32) -> serde_json::Value {
    json!({ "name": format!("Section {code}"), "code": code, "storeHiveId": hive_id })
}

#[tokio::test]
async fn test_create_returns_created_with_location() {
    let app = TestApp::new(&[5]);

    let response = app
        .request("POST", "/api/sections", Some(section_body("A1", 5)), None)
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["data"]["id"].as_i64().unwrap();
    assert_eq!(response.location, Some(format!("/api/sections/{id}")));
    assert_eq!(response.body["data"]["isDeleted"], false);
    assert_eq!(response.body["data"]["storeHiveId"], 5);
}

#[tokio::test]
async fn test_create_stamps_user_from_header() {
    let app = TestApp::new(&[5]);

    let response = app
        .request("POST", "/api/sections", Some(section_body("A1", 5)), Some("17"))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let id = response.body["data"]["id"].as_i64().unwrap() as i32;
    let row = app.store.find_section(HiveSectionId(id)).await.unwrap().unwrap();
    assert_eq!(row.created_by, UserId(17));
    assert_eq!(row.last_updated_by, UserId(17));
}

#[tokio::test]
async fn test_malformed_user_header_is_bad_request() {
    let app = TestApp::new(&[5]);

    let response = app
        .request("GET", "/api/sections", None, Some("not-a-number"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_duplicate_code_conflicts() {
    let app = TestApp::new(&[5]);
    app.create_section("A1", 5).await;

    let response = app
        .request("POST", "/api/sections", Some(section_body("A1", 5)), None)
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_create_unknown_hive_conflicts() {
    let app = TestApp::new(&[5]);

    let response = app
        .request("POST", "/api/sections", Some(section_body("A1", 6)), None)
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_invalid_body_is_bad_request() {
    let app = TestApp::new(&[5]);

    let response = app
        .request("POST", "/api/sections", Some(section_body("TOOLONG", 5)), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.store.list_sections().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_and_list_by_hive() {
    let app = TestApp::new(&[1, 2]);
    app.create_section("A", 2).await;
    app.create_section("B", 1).await;
    app.create_section("C", 2).await;

    let all = app.request("GET", "/api/sections", None, None).await;
    assert_eq!(all.status, StatusCode::OK);
    let codes: Vec<&str> = all.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["A", "B", "C"]);

    let hive_two = app.request("GET", "/api/hives/2/sections", None, None).await;
    assert_eq!(hive_two.status, StatusCode::OK);
    let codes: Vec<&str> = hive_two.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["A", "C"]);

    let empty = app.request("GET", "/api/hives/99/sections", None, None).await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.body["data"], json!([]));
}

#[tokio::test]
async fn test_update_section() {
    let app = TestApp::new(&[1, 2]);
    let id = app.create_section("A1", 1).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/sections/{id}"),
            Some(json!({ "name": "Skates", "code": "A1", "storeHiveId": 2 })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "Skates");
    assert_eq!(response.body["data"]["storeHiveId"], 2);
}

#[tokio::test]
async fn test_update_to_taken_code_conflicts() {
    let app = TestApp::new(&[1]);
    app.create_section("A1", 1).await;
    let second = app.create_section("B2", 1).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/sections/{second}"),
            Some(section_body("A1", 1)),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_section_is_not_found() {
    let app = TestApp::new(&[1]);

    let get = app.request("GET", "/api/sections/404", None, None).await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);

    let put = app
        .request("PUT", "/api/sections/404", Some(section_body("A1", 1)), None)
        .await;
    assert_eq!(put.status, StatusCode::NOT_FOUND);

    let status = app
        .request("PUT", "/api/sections/404/status/true", None, None)
        .await;
    assert_eq!(status.status, StatusCode::NOT_FOUND);

    let delete = app.request("DELETE", "/api/sections/404", None, None).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_soft_delete_first() {
    let app = TestApp::new(&[1]);
    let id = app.create_section("A1", 1).await;

    let response = app
        .request("DELETE", &format!("/api/sections/{id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let still_there = app
        .request("GET", &format!("/api/sections/{id}"), None, None)
        .await;
    assert_eq!(still_there.status, StatusCode::OK);
}

#[tokio::test]
async fn test_soft_delete_then_purge() {
    let app = TestApp::new(&[5]);
    let id = app.create_section("A1", 5).await;

    let status = app
        .request("PUT", &format!("/api/sections/{id}/status/true"), None, None)
        .await;
    assert_eq!(status.status, StatusCode::NO_CONTENT);

    let fetched = app
        .request("GET", &format!("/api/sections/{id}"), None, None)
        .await;
    assert_eq!(fetched.body["data"]["isDeleted"], true);

    let writes = app.store.write_count().await;
    let again = app
        .request("PUT", &format!("/api/sections/{id}/status/true"), None, None)
        .await;
    assert_eq!(again.status, StatusCode::NO_CONTENT);
    assert_eq!(app.store.write_count().await, writes);

    let purge = app
        .request("DELETE", &format!("/api/sections/{id}"), None, None)
        .await;
    assert_eq!(purge.status, StatusCode::NO_CONTENT);

    let gone = app
        .request("GET", &format!("/api/sections/{id}"), None, None)
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}
