//! User resource handlers
//!
//! Handlers follow the thin-layer pattern: they extract inputs, delegate to
//! `services::users`, and shape the response. Validation and store error
//! translation live below this layer.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{Method, StatusCode},
    Json,
};
use crate::{
    error::{Error, Result},
    models::users::{CreateUserRequest, DeleteUserQuery, User},
    services::users,
    state::AppState,
};

/// Methods served on `/api/users`.
pub const USERS_ALLOW: &str = "GET, POST, DELETE";

/// Methods served on `/api/users/{id}`.
pub const USER_ALLOW: &str = "DELETE";

// ============================================================================
// LIST USERS
// ============================================================================

/// GET /api/users
///
/// Lists every registered user, newest first.
///
/// # HTTP Status Codes
/// - `200 OK`: JSON array of users
/// - `500 INTERNAL_SERVER_ERROR`: Store failure
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = users::list_users(state.store.as_ref()).await?;
    Ok(Json(users))
}

// ============================================================================
// CREATE USER
// ============================================================================

/// POST /api/users
///
/// Registers a donor, blood bank or admin.
///
/// # Request Body
/// - `email`: required, unique
/// - `name`: required
/// - `phone`, `address`: optional
/// - `bloodType`: optional, one of `A+ A- B+ B- AB+ AB- O+ O-`
/// - `userType`: required, one of `DONOR`, `BLOOD_BANK`, `ADMIN`
///
/// # HTTP Status Codes
/// - `201 CREATED`: The created user
/// - `400 BAD_REQUEST`: Missing field, unknown label or unreadable body
/// - `409 CONFLICT`: Email already registered
/// - `500 INTERNAL_SERVER_ERROR`: Store failure
pub async fn create_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let Json(request) = payload?;
    let user = users::create_user(state.store.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

// ============================================================================
// DELETE USER
// ============================================================================

/// DELETE /api/users/{id}
///
/// # HTTP Status Codes
/// - `200 OK`: The deleted user
/// - `404 NOT_FOUND`: No user with this id
/// - `500 INTERNAL_SERVER_ERROR`: Store failure
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    let user = users::delete_user_by_raw_id(state.store.as_ref(), Some(&id)).await?;
    Ok(Json(user))
}

/// DELETE /api/users?id=
///
/// Same as the path form, for clients that pass the id as a query parameter.
///
/// # HTTP Status Codes
/// - `200 OK`: The deleted user
/// - `400 BAD_REQUEST`: `id` missing
/// - `404 NOT_FOUND`: No user with this id
/// - `500 INTERNAL_SERVER_ERROR`: Store failure
pub async fn delete_user_by_query(
    State(state): State<AppState>,
    query: std::result::Result<Query<DeleteUserQuery>, QueryRejection>,
) -> Result<Json<User>> {
    let Query(query) = query?;
    let user = users::delete_user_by_raw_id(state.store.as_ref(), query.id.as_deref()).await?;
    Ok(Json(user))
}

// ============================================================================
// UNSUPPORTED METHODS
// ============================================================================

/// Fallback for verbs `/api/users` does not serve.
pub async fn users_method_not_allowed(method: Method) -> Error {
    Error::MethodNotAllowed {
        method: method.to_string(),
        allow: USERS_ALLOW,
    }
}

/// Fallback for verbs `/api/users/{id}` does not serve.
pub async fn user_method_not_allowed(method: Method) -> Error {
    Error::MethodNotAllowed {
        method: method.to_string(),
        allow: USER_ALLOW,
    }
}
