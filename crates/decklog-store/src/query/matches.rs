//! Match repository.

use std::future::Future;

use uuid::Uuid;

use crate::model::{Match, NewMatch};
use crate::types::OffsetPagination;
use crate::{Entity, MemoryStore, StoreError, StoreResult, TRACING_TARGET_QUERY};

/// Repository for match operations.
///
/// Matches are written whole: a replace swaps every field and all games.
pub trait MatchRepository {
    /// Creates a match under an existing record.
    fn create_match(&self, new_match: NewMatch) -> impl Future<Output = StoreResult<Match>> + Send;

    /// Finds a match by its identifier.
    fn find_match_by_id(
        &self,
        match_id: Uuid,
    ) -> impl Future<Output = StoreResult<Option<Match>>> + Send;

    /// Replaces a match and its games.
    fn replace_match(
        &self,
        match_id: Uuid,
        new_match: NewMatch,
    ) -> impl Future<Output = StoreResult<Match>> + Send;

    /// Deletes a match.
    fn delete_match(&self, match_id: Uuid) -> impl Future<Output = StoreResult<()>> + Send;

    /// Lists the matches of a record in the order they were created.
    fn list_matches_by_record(
        &self,
        record_id: Uuid,
        pagination: OffsetPagination,
    ) -> impl Future<Output = StoreResult<Vec<Match>>> + Send;
}

impl MatchRepository for MemoryStore {
    async fn create_match(&self, new_match: NewMatch) -> StoreResult<Match> {
        let mut tables = self.write().await?;
        if !tables.records.contains_key(&new_match.record_id) {
            return Err(StoreError::not_found(Entity::Record, new_match.record_id));
        }

        let created = Match::from_new(new_match);
        tables.matches.insert(created.id, created.clone());

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            match_id = %created.id,
            record_id = %created.record_id,
            games = created.games.len(),
            "Match created",
        );
        Ok(created)
    }

    async fn find_match_by_id(&self, match_id: Uuid) -> StoreResult<Option<Match>> {
        let tables = self.read().await?;
        Ok(tables.matches.get(&match_id).cloned())
    }

    async fn replace_match(&self, match_id: Uuid, new_match: NewMatch) -> StoreResult<Match> {
        let mut tables = self.write().await?;
        if !tables.records.contains_key(&new_match.record_id) {
            return Err(StoreError::not_found(Entity::Record, new_match.record_id));
        }

        let existing = tables
            .matches
            .get_mut(&match_id)
            .ok_or(StoreError::not_found(Entity::Match, match_id))?;

        existing.replace(new_match);
        Ok(existing.clone())
    }

    async fn delete_match(&self, match_id: Uuid) -> StoreResult<()> {
        let mut tables = self.write().await?;
        tables
            .matches
            .remove(&match_id)
            .ok_or(StoreError::not_found(Entity::Match, match_id))?;
        Ok(())
    }

    async fn list_matches_by_record(
        &self,
        record_id: Uuid,
        pagination: OffsetPagination,
    ) -> StoreResult<Vec<Match>> {
        let tables = self.read().await?;
        let mut rows = tables
            .matches
            .values()
            .filter(|m| m.record_id == record_id)
            .cloned()
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        Ok(pagination.apply(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewGame, NewRecord};
    use crate::query::RecordRepository;

    #[tokio::test]
    async fn replace_keeps_identity() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let record = store
            .create_record(NewRecord {
                user_uid: "u1".to_owned(),
                ..Default::default()
            })
            .await?;

        let template = NewMatch {
            record_id: record.id,
            user_uid: "u1".to_owned(),
            ..Default::default()
        };
        let created = store.create_match(template.clone()).await?;

        let replaced = store
            .replace_match(
                created.id,
                NewMatch {
                    victory: true,
                    games: vec![NewGame {
                        winning: true,
                        ..Default::default()
                    }],
                    ..template
                },
            )
            .await?;

        assert_eq!(replaced.id, created.id);
        assert_eq!(replaced.created_at, created.created_at);
        assert_eq!(replaced.games.len(), 1);
        assert!(replaced.victory);
        Ok(())
    }

    #[tokio::test]
    async fn create_requires_existing_record() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let result = store
            .create_match(NewMatch {
                record_id: Uuid::now_v7(),
                ..Default::default()
            })
            .await;

        assert!(result.is_err_and(|e| e.is_not_found()));
        Ok(())
    }
}
