//! Shared test helper functions

use crate::common::TestApp;

/// Generates a unique test email.
///
/// # Example
/// ```no_run
/// let email = generate_test_email("donor");
/// // Returns something like "donor_0190f3c2-...@example.com"
/// ```
#[allow(dead_code)]
pub fn generate_test_email(prefix: &str) -> String {
    format!("{}_{}@example.com", prefix, uuid::Uuid::now_v7())
}

/// Creates a donor through the API and returns the response body.
///
/// Panics unless the server answers `201 Created`.
#[allow(dead_code)]
pub async fn create_donor(app: &TestApp, email: &str, name: &str) -> serde_json::Value {
    let response = app
        .client
        .post(app.url("/api/users"))
        .json(&serde_json::json!({
            "email": email,
            "name": name,
            "userType": "DONOR"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
    response.json().await.unwrap()
}

/// Fetches `GET /api/users` and returns the listed ids in order.
#[allow(dead_code)]
pub async fn list_user_ids(app: &TestApp) -> Vec<String> {
    let response = app.client.get(app.url("/api/users")).send().await.unwrap();
    assert_eq!(response.status(), 200);

    let body: Vec<serde_json::Value> = response.json().await.unwrap();
    body.iter()
        .map(|user| user["id"].as_str().unwrap().to_string())
        .collect()
}
