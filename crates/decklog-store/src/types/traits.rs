//! Capabilities shared by store models.

use jiff::Timestamp;

/// A model that belongs to exactly one identity.
pub trait HasOwner {
    /// Returns the uid of the owning identity.
    fn owner_uid(&self) -> &str;

    /// Returns whether `uid` owns this model.
    #[inline]
    fn is_owned_by(&self, uid: &str) -> bool {
        self.owner_uid() == uid
    }
}

/// A model with a creation timestamp, used for list ordering.
pub trait HasCreatedAt {
    fn created_at(&self) -> Timestamp;
}
