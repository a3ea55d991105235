/// The identity behind a request.
///
/// An empty uid denotes an anonymous caller. Built once per request from a
/// verified token and never mutated afterward.
#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Actor {
    uid: String,
}

impl Actor {
    /// Creates an actor for a verified subject.
    #[inline]
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }

    /// Creates the anonymous actor.
    #[inline]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Returns the subject uid, empty for anonymous callers.
    #[inline]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Returns whether this actor is anonymous.
    #[inline]
    pub fn is_anonymous(&self) -> bool {
        self.uid.is_empty()
    }

    /// Returns whether this actor is the given owner.
    ///
    /// Anonymous actors own nothing, even resources with an empty owner.
    #[inline]
    pub fn is(&self, owner_uid: &str) -> bool {
        !self.is_anonymous() && self.uid == owner_uid
    }
}
