//! In-memory backing store.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::model::{Deck, DeckCode, Match, Record, User};
use crate::types::{HasCreatedAt, HasOwner, OffsetPagination};
use crate::{StoreError, StoreResult, TRACING_TARGET_STORE};

/// Cloneable handle to an in-memory store.
///
/// Every clone shares the same tables. Once [`MemoryStore::close`] is called
/// each repository call fails with [`StoreError::Closed`], which is how an
/// unavailable backing store presents itself to callers.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    tables: RwLock<Tables>,
    closed: AtomicBool,
}

#[derive(Default)]
pub(crate) struct Tables {
    pub users: HashMap<Uuid, User>,
    pub records: HashMap<Uuid, Record>,
    pub decks: HashMap<Uuid, Deck>,
    pub deck_codes: HashMap<Uuid, DeckCode>,
    pub matches: HashMap<Uuid, Match>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        tracing::debug!(target: TRACING_TARGET_STORE, "In-memory store created");
        Self::default()
    }

    /// Stops serving requests. Stored data is kept but no longer reachable.
    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::Release);
        tracing::info!(target: TRACING_TARGET_STORE, "In-memory store closed");
    }

    /// Returns whether [`MemoryStore::close`] has been called.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    pub(crate) async fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.ensure_open()?;
        Ok(self.inner.tables.read().await)
    }

    pub(crate) async fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.ensure_open()?;
        Ok(self.inner.tables.write().await)
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.is_closed() {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

/// Returns the rows owned by `uid`, newest first, within the pagination window.
pub(crate) fn list_owned<T>(
    table: &HashMap<Uuid, T>,
    uid: &str,
    pagination: OffsetPagination,
    filter: impl Fn(&T) -> bool,
) -> Vec<T>
where
    T: HasOwner + HasCreatedAt + Clone,
{
    let mut rows = table
        .iter()
        .filter(|(_, row)| row.is_owned_by(uid) && filter(row))
        .collect::<Vec<_>>();

    rows.sort_by(|(a_id, a), (b_id, b)| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b_id.cmp(a_id))
    });

    pagination.apply(rows.into_iter().map(|(_, row)| row.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::RecordRepository;

    #[tokio::test]
    async fn closed_store_rejects_calls() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let clone = store.clone();
        store.close();

        assert!(clone.is_closed());
        let result = clone.find_record_by_id(Uuid::now_v7()).await;
        assert!(matches!(result, Err(StoreError::Closed)));
        Ok(())
    }
}
