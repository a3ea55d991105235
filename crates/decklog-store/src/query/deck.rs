//! Deck repository for managing decks and their archive state.

use std::future::Future;

use jiff::Timestamp;
use uuid::Uuid;

use crate::model::{Deck, NewDeck, UpdateDeck};
use crate::store::list_owned;
use crate::types::OffsetPagination;
use crate::{Entity, MemoryStore, StoreError, StoreResult, TRACING_TARGET_QUERY};

/// Repository for deck operations.
pub trait DeckRepository {
    /// Creates a new deck.
    fn create_deck(&self, deck: NewDeck) -> impl Future<Output = StoreResult<Deck>> + Send;

    /// Finds a deck by its identifier.
    fn find_deck_by_id(&self, deck_id: Uuid)
    -> impl Future<Output = StoreResult<Option<Deck>>> + Send;

    /// Updates a deck with partial changes.
    fn update_deck(
        &self,
        deck_id: Uuid,
        changes: UpdateDeck,
    ) -> impl Future<Output = StoreResult<Deck>> + Send;

    /// Deletes a deck together with its deck codes.
    fn delete_deck(&self, deck_id: Uuid) -> impl Future<Output = StoreResult<()>> + Send;

    /// Marks a deck as archived. Archiving twice keeps the first timestamp.
    fn archive_deck(&self, deck_id: Uuid) -> impl Future<Output = StoreResult<Deck>> + Send;

    /// Clears the archive mark of a deck.
    fn unarchive_deck(&self, deck_id: Uuid) -> impl Future<Output = StoreResult<Deck>> + Send;

    /// Lists decks of one owner, newest first.
    ///
    /// `archived` filters on the archive state when set.
    fn list_user_decks(
        &self,
        uid: &str,
        archived: Option<bool>,
        pagination: OffsetPagination,
    ) -> impl Future<Output = StoreResult<Vec<Deck>>> + Send;
}

impl DeckRepository for MemoryStore {
    async fn create_deck(&self, deck: NewDeck) -> StoreResult<Deck> {
        let mut tables = self.write().await?;
        let deck = Deck::from_new(deck);
        tables.decks.insert(deck.id, deck.clone());

        tracing::debug!(target: TRACING_TARGET_QUERY, deck_id = %deck.id, "Deck created");
        Ok(deck)
    }

    async fn find_deck_by_id(&self, deck_id: Uuid) -> StoreResult<Option<Deck>> {
        let tables = self.read().await?;
        Ok(tables.decks.get(&deck_id).cloned())
    }

    async fn update_deck(&self, deck_id: Uuid, changes: UpdateDeck) -> StoreResult<Deck> {
        let mut tables = self.write().await?;
        let deck = tables
            .decks
            .get_mut(&deck_id)
            .ok_or(StoreError::not_found(Entity::Deck, deck_id))?;

        deck.apply(changes);
        Ok(deck.clone())
    }

    async fn delete_deck(&self, deck_id: Uuid) -> StoreResult<()> {
        let mut tables = self.write().await?;
        tables
            .decks
            .remove(&deck_id)
            .ok_or(StoreError::not_found(Entity::Deck, deck_id))?;
        tables.deck_codes.retain(|_, code| code.deck_id != deck_id);

        tracing::debug!(target: TRACING_TARGET_QUERY, deck_id = %deck_id, "Deck deleted");
        Ok(())
    }

    async fn archive_deck(&self, deck_id: Uuid) -> StoreResult<Deck> {
        let mut tables = self.write().await?;
        let deck = tables
            .decks
            .get_mut(&deck_id)
            .ok_or(StoreError::not_found(Entity::Deck, deck_id))?;

        if deck.archived_at.is_none() {
            let now = Timestamp::now();
            deck.archived_at = Some(now);
            deck.updated_at = now;
        }
        Ok(deck.clone())
    }

    async fn unarchive_deck(&self, deck_id: Uuid) -> StoreResult<Deck> {
        let mut tables = self.write().await?;
        let deck = tables
            .decks
            .get_mut(&deck_id)
            .ok_or(StoreError::not_found(Entity::Deck, deck_id))?;

        if deck.archived_at.take().is_some() {
            deck.updated_at = Timestamp::now();
        }
        Ok(deck.clone())
    }

    async fn list_user_decks(
        &self,
        uid: &str,
        archived: Option<bool>,
        pagination: OffsetPagination,
    ) -> StoreResult<Vec<Deck>> {
        let tables = self.read().await?;
        let rows = list_owned(&tables.decks, uid, pagination, |deck| {
            archived.is_none_or(|archived| deck.is_archived() == archived)
        });
        Ok(rows)
    }
}
