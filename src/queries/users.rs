use crate::{
    error::{Error, Result},
    models::users::{BloodType, NewUser, User, UserType},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::DbConn;

/// Raw `users` row. Enum columns are stored as text and checked on the way out.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    phone: Option<String>,
    address: Option<String>,
    blood_type: Option<String>,
    user_type: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = Error;

    fn try_from(row: UserRow) -> Result<Self> {
        let user_type = row
            .user_type
            .parse::<UserType>()
            .map_err(Error::Internal)?;
        let blood_type = row
            .blood_type
            .as_deref()
            .map(str::parse::<BloodType>)
            .transpose()
            .map_err(Error::Internal)?;

        Ok(User {
            id: row.id,
            email: row.email,
            name: row.name,
            phone: row.phone,
            address: row.address,
            blood_type,
            user_type,
            created_at: row.created_at,
        })
    }
}

/// Creates a new user in the database.
///
/// A violated email uniqueness constraint is reported as `Error::Conflict`.
pub async fn create_user(conn: &mut DbConn, new_user: NewUser) -> Result<User> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (id, email, name, phone, address, blood_type, user_type, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, email, name, phone, address, blood_type, user_type, created_at
        "#,
    )
    .bind(new_user.id)
    .bind(&new_user.email)
    .bind(&new_user.name)
    .bind(&new_user.phone)
    .bind(&new_user.address)
    .bind(new_user.blood_type.map(|b| b.as_str()))
    .bind(new_user.user_type.as_str())
    .bind(new_user.created_at)
    .fetch_one(conn)
    .await
    .map_err(|e| {
        let is_unique_violation = e
            .as_database_error()
            .map(|db_err| db_err.is_unique_violation())
            .unwrap_or(false);

        if is_unique_violation {
            Error::Conflict("A user with this email already exists".to_string())
        } else {
            Error::Sqlx(e)
        }
    })?;

    row.try_into()
}

/// Gets a single user by their ID. The user may not exist.
pub async fn get_user_by_id(conn: &mut DbConn, id: Uuid) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, email, name, phone, address, blood_type, user_type, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    row.map(User::try_from).transpose()
}

/// Lists all users in the database, newest first.
pub async fn list_users(conn: &mut DbConn) -> Result<Vec<User>> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, email, name, phone, address, blood_type, user_type, created_at
        FROM users
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    rows.into_iter().map(User::try_from).collect()
}

/// Deletes a user by their ID, returning the removed record.
///
/// Returns `None` when no row matched, so a repeated delete is observable.
pub async fn delete_user(conn: &mut DbConn, id: Uuid) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        DELETE FROM users
        WHERE id = $1
        RETURNING id, email, name, phone, address, blood_type, user_type, created_at
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    row.map(User::try_from).transpose()
}

/// Round-trips a trivial statement to prove the database is reachable.
pub async fn ping(conn: &mut DbConn) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(conn)
        .await
        .map_err(Error::Sqlx)?;

    Ok(())
}
