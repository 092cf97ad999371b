//! User resource endpoint tests
//!
//! Cover list/create/delete, the status code mapping for every error kind,
//! and the `Allow` header on unsupported methods.

use bloodlink::UserStore;

use crate::common::{
    TestApp,
    helpers::{create_donor, generate_test_email, list_user_ids},
};

// ============================================================================
// End-to-end flow
// ============================================================================

#[tokio::test]
async fn test_create_list_delete_flow() {
    let app = TestApp::new().await;

    // POST
    let created = create_donor(&app, "a@x.com", "A").await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["email"], "a@x.com");
    assert_eq!(created["userType"], "DONOR");

    // GET lists it first
    let ids = list_user_ids(&app).await;
    assert_eq!(ids.first(), Some(&id));

    // DELETE returns the same record
    let response = app.client
        .delete(app.url(&format!("/api/users/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let deleted: serde_json::Value = response.json().await.unwrap();
    assert_eq!(deleted, created);

    // GET no longer has it
    assert!(!list_user_ids(&app).await.contains(&id));

    // DELETE again is 404
    let response = app.client
        .delete(app.url(&format!("/api/users/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "User not found");
}

// ============================================================================
// LIST
// ============================================================================

#[tokio::test]
async fn test_list_empty_store_returns_empty_array() {
    let app = TestApp::new().await;
    assert!(list_user_ids(&app).await.is_empty());
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = TestApp::new().await;

    let mut created = Vec::new();
    for i in 0..5 {
        let user = create_donor(&app, &generate_test_email("order"), &format!("Donor {}", i)).await;
        created.push(user["id"].as_str().unwrap().to_string());
    }
    created.reverse();

    assert_eq!(list_user_ids(&app).await, created);
}

// ============================================================================
// CREATE
// ============================================================================

#[tokio::test]
async fn test_create_returns_full_record() {
    let app = TestApp::new().await;
    let before = chrono::Utc::now();

    let response = app.client
        .post(app.url("/api/users"))
        .json(&serde_json::json!({
            "email": "checkapi@example.com",
            "name": "Check API User",
            "phone": "+10000000001",
            "address": "Testville",
            "bloodType": "A+",
            "userType": "BLOOD_BANK"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["name"], "Check API User");
    assert_eq!(body["phone"], "+10000000001");
    assert_eq!(body["address"], "Testville");
    assert_eq!(body["bloodType"], "A+");
    assert_eq!(body["userType"], "BLOOD_BANK");

    let created_at: chrono::DateTime<chrono::Utc> =
        body["createdAt"].as_str().unwrap().parse().unwrap();
    // Stored timestamps carry microsecond precision
    assert!(created_at >= before - chrono::Duration::microseconds(1));
}

#[tokio::test]
async fn test_create_duplicate_email_is_409() {
    let app = TestApp::new().await;
    let email = generate_test_email("dup");

    create_donor(&app, &email, "First").await;

    let response = app.client
        .post(app.url("/api/users"))
        .json(&serde_json::json!({
            "email": email,
            "name": "Second",
            "userType": "ADMIN"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 409);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "A user with this email already exists");
    assert_eq!(body["code"], "CONFLICT");
    assert_eq!(list_user_ids(&app).await.len(), 1);
}

#[tokio::test]
async fn test_create_missing_email_is_400_and_stores_nothing() {
    let app = TestApp::new().await;

    let response = app.client
        .post(app.url("/api/users"))
        .json(&serde_json::json!({
            "name": "No Email",
            "userType": "DONOR"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["fields"]["email"].is_string());
    assert!(app.store.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_missing_user_type_is_400() {
    let app = TestApp::new().await;

    let response = app.client
        .post(app.url("/api/users"))
        .json(&serde_json::json!({
            "email": generate_test_email("no_type"),
            "name": "No Type"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["fields"]["userType"].is_string());
}

#[tokio::test]
async fn test_create_unknown_blood_type_is_400() {
    let app = TestApp::new().await;

    let response = app.client
        .post(app.url("/api/users"))
        .json(&serde_json::json!({
            "email": generate_test_email("bad_blood"),
            "name": "Bad Blood",
            "bloodType": "Q+",
            "userType": "DONOR"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["fields"]["bloodType"].is_string());
}

#[tokio::test]
async fn test_create_malformed_json_is_400() {
    let app = TestApp::new().await;

    let response = app.client
        .post(app.url("/api/users"))
        .header("content-type", "application/json")
        .body("{\"email\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ============================================================================
// DELETE
// ============================================================================

#[tokio::test]
async fn test_delete_never_created_id_is_404() {
    let app = TestApp::new().await;

    let response = app.client
        .delete(app.url(&format!("/api/users/{}", uuid::Uuid::now_v7())))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_delete_malformed_id_is_404() {
    let app = TestApp::new().await;

    let response = app.client
        .delete(app.url("/api/users/not-a-real-id"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_delete_by_query_parameter() {
    let app = TestApp::new().await;
    let created = create_donor(&app, &generate_test_email("query"), "Query").await;
    let id = created["id"].as_str().unwrap();

    let response = app.client
        .delete(app.url(&format!("/api/users?id={}", id)))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let deleted: serde_json::Value = response.json().await.unwrap();
    assert_eq!(deleted["id"], id);
    assert!(list_user_ids(&app).await.is_empty());
}

#[tokio::test]
async fn test_delete_without_id_is_400() {
    let app = TestApp::new().await;

    let response = app.client
        .delete(app.url("/api/users"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["fields"]["id"], "Missing id");
}

// ============================================================================
// Unsupported methods
// ============================================================================

#[tokio::test]
async fn test_put_on_collection_is_405_with_allow() {
    let app = TestApp::new().await;

    let response = app.client
        .put(app.url("/api/users"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 405);
    assert_eq!(response.headers().get("allow").unwrap(), "GET, POST, DELETE");
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Method PUT Not Allowed");
}

#[tokio::test]
async fn test_patch_on_item_is_405_with_allow() {
    let app = TestApp::new().await;
    let created = create_donor(&app, &generate_test_email("patch"), "Patch").await;
    let id = created["id"].as_str().unwrap();

    let response = app.client
        .patch(app.url(&format!("/api/users/{}", id)))
        .json(&serde_json::json!({ "name": "Renamed" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 405);
    assert_eq!(response.headers().get("allow").unwrap(), "DELETE");

    // No update path exists; the record is untouched
    let users = app.store.list_users().await.unwrap();
    assert_eq!(users[0].name, "Patch");
}
