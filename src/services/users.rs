use chrono::{SubsecRound, Utc};
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    models::users::{CreateUserRequest, NewUser, User},
    store::UserStore,
    validation::{validate_create_user, validate_user_id},
};

// ============================================================================
// LIST
// ============================================================================

/// Lists every user, newest first.
///
/// # Errors
/// * `Sqlx` / `Internal` - the store could not be reached
pub async fn list_users(store: &dyn UserStore) -> Result<Vec<User>> {
    let users = store.list_users().await?;

    tracing::debug!(count = users.len(), "[Users] Service: Listed users");

    Ok(users)
}

// ============================================================================
// CREATE
// ============================================================================

/// Validates and creates a user with a fresh id and creation time.
///
/// The timestamp is truncated to microseconds so the returned record is
/// identical to what Postgres stores.
///
/// # Errors
/// * `Validation` - a required field is missing or an enum label is unknown
/// * `Conflict` - the email is already registered
/// * `Sqlx` / `Internal` - any other store failure
pub async fn create_user(store: &dyn UserStore, request: CreateUserRequest) -> Result<User> {
    let valid = validate_create_user(request)?;

    let new_user = NewUser {
        id: Uuid::now_v7(),
        email: valid.email,
        name: valid.name,
        phone: valid.phone,
        address: valid.address,
        blood_type: valid.blood_type,
        user_type: valid.user_type,
        created_at: Utc::now().trunc_subsecs(6),
    };

    match store.insert_user(new_user).await {
        Ok(user) => {
            tracing::info!(
                user_id = %user.id,
                user_type = %user.user_type,
                "[Users] Service: Created user"
            );
            Ok(user)
        }
        Err(Error::Conflict(msg)) => {
            tracing::warn!("[Users] Service: Rejected duplicate email");
            Err(Error::Conflict(msg))
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// DELETE
// ============================================================================

/// Deletes a user by id and returns the removed record.
///
/// Deletion is terminal; deleting the same id again yields `NotFound`.
///
/// # Errors
/// * `NotFound` - no user has this id
/// * `Sqlx` / `Internal` - any other store failure
pub async fn delete_user(store: &dyn UserStore, id: Uuid) -> Result<User> {
    match store.delete_user(id).await? {
        Some(user) => {
            tracing::info!(user_id = %user.id, "[Users] Service: Deleted user");
            Ok(user)
        }
        None => {
            tracing::warn!(user_id = %id, "[Users] Service: Delete target not found");
            Err(Error::NotFound("User not found".to_string()))
        }
    }
}

/// Deletes a user identified by a raw, client-supplied id.
///
/// # Errors
/// * `Validation` - the id is missing or blank
/// * `NotFound` - the id is malformed or no user has it
pub async fn delete_user_by_raw_id(store: &dyn UserStore, raw_id: Option<&str>) -> Result<User> {
    let id = validate_user_id(raw_id)?;
    delete_user(store, id).await
}
