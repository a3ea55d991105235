use std::future::Future;

use decklog_store::query::{
    DeckCodeRepository, DeckRepository, MatchRepository, RecordRepository, UserRepository,
};
use decklog_store::{Entity, MemoryStore, StoreError, StoreResult};
use uuid::Uuid;

use crate::TRACING_TARGET_AUTHORIZATION;
use crate::policy::ResourceRef;

/// Ownership and privacy of one resource, as seen by authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ownership {
    /// Subject uid of the owner.
    pub owner_uid: String,
    /// Whether non-owners are denied reads.
    pub is_private: bool,
    /// Parent whose visibility this resource inherits.
    pub parent_id: Option<Uuid>,
}

impl Ownership {
    /// Creates a descriptor without a parent.
    pub fn new(owner_uid: impl Into<String>, is_private: bool) -> Self {
        Self {
            owner_uid: owner_uid.into(),
            is_private,
            parent_id: None,
        }
    }

    /// Sets the parent this resource inherits visibility from.
    pub fn with_parent(self, parent_id: Uuid) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..self
        }
    }
}

/// Returns the kind a resource inherits its visibility from.
#[inline]
pub const fn parent_kind(kind: Entity) -> Option<Entity> {
    match kind {
        Entity::Match => Some(Entity::Record),
        _ => None,
    }
}

/// The narrow lookup capability authorization needs from persistence.
///
/// `Ok(None)` means the resource does not exist; `Err` is an infrastructure
/// failure.
pub trait ResourceLookup: Send + Sync {
    /// Finds ownership of the resource of `kind` with `id`.
    fn find_resource(
        &self,
        kind: Entity,
        id: Uuid,
    ) -> impl Future<Output = StoreResult<Option<Ownership>>> + Send;
}

impl ResourceLookup for MemoryStore {
    async fn find_resource(&self, kind: Entity, id: Uuid) -> StoreResult<Option<Ownership>> {
        let ownership = match kind {
            Entity::User => self
                .find_user_by_id(id)
                .await?
                .map(|user| Ownership::new(user.uid, false)),
            Entity::Record => self
                .find_record_by_id(id)
                .await?
                .map(|record| Ownership::new(record.user_uid, record.is_private)),
            Entity::Deck => self
                .find_deck_by_id(id)
                .await?
                .map(|deck| Ownership::new(deck.user_uid, false)),
            Entity::DeckCode => self
                .find_deck_code_by_id(id)
                .await?
                .map(|code| Ownership::new(code.user_uid, code.is_private)),
            Entity::Match => self.find_match_by_id(id).await?.map(|found| {
                Ownership::new(found.user_uid, false).with_parent(found.record_id)
            }),
        };

        Ok(ownership)
    }
}

/// Resolves ownership of resources and of their parents.
///
/// Lookups run one after another, without retry or caching.
#[derive(Debug, Clone, Copy)]
pub struct OwnershipResolver<'a, L> {
    lookup: &'a L,
}

impl<'a, L> OwnershipResolver<'a, L>
where
    L: ResourceLookup,
{
    /// Creates a resolver over the given lookup.
    #[inline]
    pub const fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }

    /// Resolves the resource itself.
    pub async fn resolve(&self, target: ResourceRef) -> StoreResult<Option<Ownership>> {
        tracing::trace!(
            target: TRACING_TARGET_AUTHORIZATION,
            resource = %target,
            "resolving ownership",
        );

        self.lookup.find_resource(target.kind, target.id).await
    }

    /// Resolves the parent the resource inherits its visibility from.
    ///
    /// A missing child or a missing parent resolve to `Ok(None)`. A kind
    /// without a parent, or a child without a parent id, is an error.
    pub async fn resolve_parent(&self, target: ResourceRef) -> StoreResult<Option<Ownership>> {
        let Some(kind) = parent_kind(target.kind) else {
            return Err(StoreError::Unexpected(
                format!("{} has no parent resource", target.kind).into(),
            ));
        };

        let Some(child) = self.resolve(target).await? else {
            return Ok(None);
        };

        let Some(parent_id) = child.parent_id else {
            return Err(StoreError::Unexpected(
                format!("{target} is missing its parent id").into(),
            ));
        };

        self.resolve(ResourceRef::new(kind, parent_id)).await
    }
}
