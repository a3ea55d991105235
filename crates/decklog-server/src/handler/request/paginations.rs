//! Offset pagination query parameters.

use decklog_store::types::OffsetPagination;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Pagination parameters accepted by list endpoints.
///
/// `limit` must lie in `1..=100` when given.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, JsonSchema, Validate)]
pub struct Pagination {
    /// The number of items to skip before starting to return results.
    #[validate(range(max = 100000))]
    pub offset: Option<u32>,

    /// The maximum number of items to return.
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

impl Pagination {
    /// Default pagination limit.
    const DEFAULT_LIMIT: u32 = 20;
    /// Default pagination offset.
    const DEFAULT_OFFSET: u32 = 0;

    /// Returns a new [`Pagination`].
    #[inline]
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    /// Returns the pagination offset.
    pub fn offset(&self) -> u32 {
        self.offset.unwrap_or(Self::DEFAULT_OFFSET)
    }

    /// Returns the pagination limit.
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

impl From<Pagination> for OffsetPagination {
    fn from(pagination: Pagination) -> Self {
        Self::new(pagination.limit() as usize, pagination.offset() as usize)
    }
}
