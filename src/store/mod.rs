//! Persistence gateway for user records.
//!
//! The composition root builds exactly one store and hands it to
//! [`AppState`](crate::state::AppState); handlers never construct their own.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    config::{DatabaseConfig, StoreBackend},
    database,
    error::Result,
    models::users::{NewUser, User},
};

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Storage operations backing the user resource.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users ordered by creation time, newest first.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Inserts a user. Fails with `Error::Conflict` when the email is taken.
    async fn insert_user(&self, new_user: NewUser) -> Result<User>;

    /// Removes a user, returning it, or `None` when no such user exists.
    async fn delete_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Succeeds when the store can serve requests.
    async fn ping(&self) -> Result<()>;
}

/// Shared handle to the process-wide store.
pub type SharedUserStore = Arc<dyn UserStore>;

/// Builds the store selected by configuration.
///
/// For Postgres this opens the connection pool and applies migrations.
pub async fn open(config: &DatabaseConfig) -> Result<SharedUserStore> {
    match config.backend {
        StoreBackend::Postgres => {
            let pool = database::connect(config).await?;
            database::migrate(&pool).await?;
            Ok(Arc::new(PgUserStore::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory user store; data is lost on exit");
            Ok(Arc::new(MemoryUserStore::new()))
        }
    }
}
