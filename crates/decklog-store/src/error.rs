//! Error types for store operations.

use std::borrow::Cow;

use strum::{AsRefStr, Display, EnumIter};
use uuid::Uuid;

/// Entity kinds held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Entity {
    User,
    Record,
    Deck,
    DeckCode,
    Match,
}

/// Comprehensive error type for all store operations.
///
/// Only [`StoreError::NotFound`] and [`StoreError::Conflict`] describe the
/// data; every other variant means the store itself could not serve the call.
#[derive(Debug, Clone, thiserror::Error)]
#[must_use = "store errors should be handled appropriately"]
pub enum StoreError {
    /// The addressed row does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: Uuid },

    /// The write would violate a uniqueness or reference constraint.
    #[error("Constraint violation: {0}")]
    Conflict(Cow<'static, str>),

    /// The store was closed and no longer serves requests.
    #[error("Store is closed")]
    Closed,

    /// Unexpected error occurred.
    #[error("Unexpected error: {0}")]
    Unexpected(Cow<'static, str>),
}

impl StoreError {
    /// Creates a [`StoreError::NotFound`] for the given entity and id.
    #[inline]
    pub fn not_found(entity: Entity, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Returns whether this error describes missing data rather than a failure.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns whether this error indicates the store could not serve the call.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Closed | Self::Unexpected(_))
    }
}

/// Specialized [`Result`] type for store operations.
pub type StoreResult<T, E = StoreError> = Result<T, E>;

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn entity_names_are_snake_case() {
        assert_eq!(Entity::DeckCode.as_ref(), "deck_code");
        for entity in Entity::iter() {
            assert!(!entity.to_string().contains(char::is_uppercase));
        }
    }

    #[test]
    fn error_classification() {
        let id = Uuid::now_v7();
        assert!(StoreError::not_found(Entity::Record, id).is_not_found());
        assert!(!StoreError::not_found(Entity::Record, id).is_unavailable());
        assert!(StoreError::Closed.is_unavailable());
        assert!(!StoreError::Conflict("uid".into()).is_unavailable());
    }
}
