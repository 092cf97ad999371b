use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    models::users::{NewUser, User},
};

use super::UserStore;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    emails: HashSet<String>,
}

/// In-process store with the same uniqueness and ordering rules as the
/// `users` table. The write lock is held across check-and-insert so a
/// duplicate email can never slip in between.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    tables: RwLock<Tables>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list_users(&self) -> Result<Vec<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(users)
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User> {
        let mut tables = self.tables.write().await;

        if tables.emails.contains(&new_user.email) {
            return Err(Error::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }
        if tables.users.contains_key(&new_user.id) {
            return Err(Error::Internal(format!("Duplicate user id {}", new_user.id)));
        }

        let user = User::from(new_user);
        tables.emails.insert(user.email.clone());
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> Result<Option<User>> {
        let mut tables = self.tables.write().await;
        let removed = tables.users.remove(&id);
        if let Some(user) = &removed {
            tables.emails.remove(&user.email);
        }
        Ok(removed)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
