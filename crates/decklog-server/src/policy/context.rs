use std::fmt;

use decklog_store::Entity;
use uuid::Uuid;

use crate::extract::Actor;

/// A typed reference to one stored resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub kind: Entity,
    pub id: Uuid,
}

impl ResourceRef {
    #[inline]
    pub const fn new(kind: Entity, id: Uuid) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Per-request snapshot of who is calling and what they address.
///
/// Built once before any business logic runs. Steps never mutate it; they
/// return an updated copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessContext {
    actor: Actor,
    target: Option<ResourceRef>,
}

impl AccessContext {
    /// Creates an anonymous context without a target.
    #[inline]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Creates a context for `actor` without a target.
    #[inline]
    pub fn for_actor(actor: impl Into<Actor>) -> Self {
        Self {
            actor: actor.into(),
            target: None,
        }
    }

    /// Creates an anonymous context addressing `target`.
    #[inline]
    pub fn for_target(target: ResourceRef) -> Self {
        Self {
            actor: Actor::anonymous(),
            target: Some(target),
        }
    }

    /// Returns a copy with the actor replaced.
    #[inline]
    pub fn with_actor(self, actor: Actor) -> Self {
        Self { actor, ..self }
    }

    /// Returns a copy with the target replaced.
    #[inline]
    pub fn with_target(self, target: ResourceRef) -> Self {
        Self {
            target: Some(target),
            ..self
        }
    }

    /// Returns the actor.
    #[inline]
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Returns the addressed resource, if any.
    #[inline]
    pub fn target(&self) -> Option<ResourceRef> {
        self.target
    }

    /// Consumes the context and returns the actor.
    #[inline]
    pub fn into_actor(self) -> Actor {
        self.actor
    }
}
