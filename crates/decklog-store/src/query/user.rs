//! User repository for managing profiles.

use std::future::Future;

use uuid::Uuid;

use crate::model::{NewUser, UpdateUser, User};
use crate::{Entity, MemoryStore, StoreError, StoreResult, TRACING_TARGET_QUERY};

/// Repository for user profile operations.
pub trait UserRepository {
    /// Creates a profile. Fails with a conflict when the uid already has one.
    fn create_user(&self, user: NewUser) -> impl Future<Output = StoreResult<User>> + Send;

    /// Finds a profile by its identifier.
    fn find_user_by_id(&self, user_id: Uuid)
    -> impl Future<Output = StoreResult<Option<User>>> + Send;

    /// Finds the profile of a token subject.
    fn find_user_by_uid(&self, uid: &str) -> impl Future<Output = StoreResult<Option<User>>> + Send;

    /// Updates a profile with partial changes.
    fn update_user(
        &self,
        user_id: Uuid,
        changes: UpdateUser,
    ) -> impl Future<Output = StoreResult<User>> + Send;

    /// Deletes a profile.
    fn delete_user(&self, user_id: Uuid) -> impl Future<Output = StoreResult<()>> + Send;
}

impl UserRepository for MemoryStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.write().await?;

        if tables.users.values().any(|existing| existing.uid == user.uid) {
            return Err(StoreError::Conflict("user profile already exists".into()));
        }

        let user = User::from_new(user);
        tables.users.insert(user.id, user.clone());

        tracing::debug!(target: TRACING_TARGET_QUERY, user_id = %user.id, "User created");
        Ok(user)
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        let tables = self.read().await?;
        Ok(tables.users.get(&user_id).cloned())
    }

    async fn find_user_by_uid(&self, uid: &str) -> StoreResult<Option<User>> {
        let tables = self.read().await?;
        Ok(tables.users.values().find(|user| user.uid == uid).cloned())
    }

    async fn update_user(&self, user_id: Uuid, changes: UpdateUser) -> StoreResult<User> {
        let mut tables = self.write().await?;
        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::not_found(Entity::User, user_id))?;

        user.apply(changes);
        Ok(user.clone())
    }

    async fn delete_user(&self, user_id: Uuid) -> StoreResult<()> {
        let mut tables = self.write().await?;
        tables
            .users
            .remove(&user_id)
            .ok_or(StoreError::not_found(Entity::User, user_id))?;

        tracing::debug!(target: TRACING_TARGET_QUERY, user_id = %user_id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(uid: &str) -> NewUser {
        NewUser {
            uid: uid.to_owned(),
            display_name: "Ash".to_owned(),
        }
    }

    #[tokio::test]
    async fn duplicate_uid_conflicts() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        store.create_user(new_user("u1")).await?;

        let result = store.create_user(new_user("u1")).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_and_lookup_by_uid() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("u1")).await?;

        let changes = UpdateUser {
            display_name: Some("Misty".to_owned()),
        };
        store.update_user(user.id, changes).await?;

        let found = store.find_user_by_uid("u1").await?;
        assert_eq!(found.map(|u| u.display_name), Some("Misty".to_owned()));
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let result = store.delete_user(Uuid::now_v7()).await;
        assert!(result.is_err_and(|e| e.is_not_found()));
        Ok(())
    }
}
