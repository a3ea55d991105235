//! Deck code repository.

use std::future::Future;

use uuid::Uuid;

use crate::model::{DeckCode, NewDeckCode, UpdateDeckCode};
use crate::types::OffsetPagination;
use crate::{Entity, MemoryStore, StoreError, StoreResult, TRACING_TARGET_QUERY};

/// Repository for deck code operations.
pub trait DeckCodeRepository {
    /// Creates a deck code under an existing deck.
    fn create_deck_code(
        &self,
        deck_code: NewDeckCode,
    ) -> impl Future<Output = StoreResult<DeckCode>> + Send;

    /// Finds a deck code by its identifier.
    fn find_deck_code_by_id(
        &self,
        deck_code_id: Uuid,
    ) -> impl Future<Output = StoreResult<Option<DeckCode>>> + Send;

    /// Updates a deck code with partial changes.
    fn update_deck_code(
        &self,
        deck_code_id: Uuid,
        changes: UpdateDeckCode,
    ) -> impl Future<Output = StoreResult<DeckCode>> + Send;

    /// Deletes a deck code.
    fn delete_deck_code(&self, deck_code_id: Uuid) -> impl Future<Output = StoreResult<()>> + Send;

    /// Lists the deck codes of a deck, newest first.
    fn list_deck_codes_by_deck(
        &self,
        deck_id: Uuid,
        pagination: OffsetPagination,
    ) -> impl Future<Output = StoreResult<Vec<DeckCode>>> + Send;
}

impl DeckCodeRepository for MemoryStore {
    async fn create_deck_code(&self, deck_code: NewDeckCode) -> StoreResult<DeckCode> {
        let mut tables = self.write().await?;
        if !tables.decks.contains_key(&deck_code.deck_id) {
            return Err(StoreError::not_found(Entity::Deck, deck_code.deck_id));
        }

        let deck_code = DeckCode::from_new(deck_code);
        tables.deck_codes.insert(deck_code.id, deck_code.clone());

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            deck_code_id = %deck_code.id,
            deck_id = %deck_code.deck_id,
            "Deck code created",
        );
        Ok(deck_code)
    }

    async fn find_deck_code_by_id(&self, deck_code_id: Uuid) -> StoreResult<Option<DeckCode>> {
        let tables = self.read().await?;
        Ok(tables.deck_codes.get(&deck_code_id).cloned())
    }

    async fn update_deck_code(
        &self,
        deck_code_id: Uuid,
        changes: UpdateDeckCode,
    ) -> StoreResult<DeckCode> {
        let mut tables = self.write().await?;
        let deck_code = tables
            .deck_codes
            .get_mut(&deck_code_id)
            .ok_or(StoreError::not_found(Entity::DeckCode, deck_code_id))?;

        deck_code.apply(changes);
        Ok(deck_code.clone())
    }

    async fn delete_deck_code(&self, deck_code_id: Uuid) -> StoreResult<()> {
        let mut tables = self.write().await?;
        tables
            .deck_codes
            .remove(&deck_code_id)
            .ok_or(StoreError::not_found(Entity::DeckCode, deck_code_id))?;
        Ok(())
    }

    async fn list_deck_codes_by_deck(
        &self,
        deck_id: Uuid,
        pagination: OffsetPagination,
    ) -> StoreResult<Vec<DeckCode>> {
        let tables = self.read().await?;
        let mut rows = tables
            .deck_codes
            .values()
            .filter(|code| code.deck_id == deck_id)
            .cloned()
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

        Ok(pagination.apply(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_requires_existing_deck() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let result = store
            .create_deck_code(NewDeckCode {
                user_uid: "u1".to_owned(),
                deck_id: Uuid::now_v7(),
                code: "abc-123".to_owned(),
                ..Default::default()
            })
            .await;

        assert!(matches!(
            result,
            Err(StoreError::NotFound {
                entity: Entity::Deck,
                ..
            })
        ));
        Ok(())
    }
}
