//! Response types for HTTP handlers.

use decklog_store::types::OffsetPagination;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod deck_codes;
mod decks;
mod errors;
mod matches;
mod monitors;
mod records;
mod users;

pub use deck_codes::*;
pub use decks::*;
pub use errors::*;
pub use matches::*;
pub use monitors::*;
pub use records::*;
pub use users::*;

/// Generic paginated response wrapper.
///
/// Echoes the window that produced `items`; a page shorter than `limit`
/// is the last one.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(rename = "{T}sPage")]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Number of items skipped.
    pub offset: usize,
    /// Maximum number of items in this page.
    pub limit: usize,
}

impl<T> Page<T> {
    /// Creates a page from already converted items.
    pub fn new(items: Vec<T>, pagination: OffsetPagination) -> Self {
        Self {
            items,
            offset: pagination.offset,
            limit: pagination.limit,
        }
    }

    /// Converts store models into a page of response items.
    pub fn from_models<M>(models: Vec<M>, pagination: OffsetPagination) -> Self
    where
        T: From<M>,
    {
        Self::new(models.into_iter().map(T::from).collect(), pagination)
    }

    /// Returns the number of items in this page.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the page has no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
