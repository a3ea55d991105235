//! Record repository for managing event records.

use std::future::Future;

use uuid::Uuid;

use crate::model::{NewRecord, Record, UpdateRecord};
use crate::store::list_owned;
use crate::types::OffsetPagination;
use crate::{Entity, MemoryStore, StoreError, StoreResult, TRACING_TARGET_QUERY};

/// Repository for record operations.
pub trait RecordRepository {
    /// Creates a new record.
    fn create_record(&self, record: NewRecord) -> impl Future<Output = StoreResult<Record>> + Send;

    /// Finds a record by its identifier.
    fn find_record_by_id(
        &self,
        record_id: Uuid,
    ) -> impl Future<Output = StoreResult<Option<Record>>> + Send;

    /// Updates a record with partial changes.
    fn update_record(
        &self,
        record_id: Uuid,
        changes: UpdateRecord,
    ) -> impl Future<Output = StoreResult<Record>> + Send;

    /// Deletes a record together with its matches.
    fn delete_record(&self, record_id: Uuid) -> impl Future<Output = StoreResult<()>> + Send;

    /// Lists records of one owner, newest first.
    fn list_user_records(
        &self,
        uid: &str,
        pagination: OffsetPagination,
    ) -> impl Future<Output = StoreResult<Vec<Record>>> + Send;
}

impl RecordRepository for MemoryStore {
    async fn create_record(&self, record: NewRecord) -> StoreResult<Record> {
        let mut tables = self.write().await?;
        let record = Record::from_new(record);
        tables.records.insert(record.id, record.clone());

        tracing::debug!(target: TRACING_TARGET_QUERY, record_id = %record.id, "Record created");
        Ok(record)
    }

    async fn find_record_by_id(&self, record_id: Uuid) -> StoreResult<Option<Record>> {
        let tables = self.read().await?;
        Ok(tables.records.get(&record_id).cloned())
    }

    async fn update_record(&self, record_id: Uuid, changes: UpdateRecord) -> StoreResult<Record> {
        let mut tables = self.write().await?;
        let record = tables
            .records
            .get_mut(&record_id)
            .ok_or(StoreError::not_found(Entity::Record, record_id))?;

        record.apply(changes);
        Ok(record.clone())
    }

    async fn delete_record(&self, record_id: Uuid) -> StoreResult<()> {
        let mut tables = self.write().await?;
        tables
            .records
            .remove(&record_id)
            .ok_or(StoreError::not_found(Entity::Record, record_id))?;

        let before = tables.matches.len();
        tables.matches.retain(|_, m| m.record_id != record_id);

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            record_id = %record_id,
            matches_removed = before - tables.matches.len(),
            "Record deleted",
        );
        Ok(())
    }

    async fn list_user_records(
        &self,
        uid: &str,
        pagination: OffsetPagination,
    ) -> StoreResult<Vec<Record>> {
        let tables = self.read().await?;
        Ok(list_owned(&tables.records, uid, pagination, |_| true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewMatch;
    use crate::query::MatchRepository;

    fn new_record(uid: &str) -> NewRecord {
        NewRecord {
            user_uid: uid.to_owned(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        store.create_record(new_record("u1")).await?;
        store.create_record(new_record("u1")).await?;
        store.create_record(new_record("u2")).await?;

        let records = store
            .list_user_records("u1", OffsetPagination::default())
            .await?;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.user_uid == "u1"));
        assert!(records[0].created_at >= records[1].created_at);
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_matches() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let record = store.create_record(new_record("u1")).await?;
        let created = store
            .create_match(NewMatch {
                record_id: record.id,
                user_uid: "u1".to_owned(),
                ..Default::default()
            })
            .await?;

        store.delete_record(record.id).await?;

        assert!(store.find_record_by_id(record.id).await?.is_none());
        assert!(store.find_match_by_id(created.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let record = store
            .create_record(NewRecord {
                memo: Some("city league".to_owned()),
                ..new_record("u1")
            })
            .await?;

        let changes = UpdateRecord {
            is_private: Some(true),
            ..Default::default()
        };
        let updated = store.update_record(record.id, changes).await?;

        assert!(updated.is_private);
        assert_eq!(updated.memo.as_deref(), Some("city league"));
        Ok(())
    }
}
