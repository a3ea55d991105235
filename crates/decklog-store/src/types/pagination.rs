//! Offset-based pagination for list queries.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Maximum number of items per page.
pub const MAX_LIMIT: usize = 100;

/// Offset-based pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct OffsetPagination {
    /// Maximum number of items to return.
    pub limit: usize,
    /// Number of items to skip.
    pub offset: usize,
}

impl OffsetPagination {
    /// Creates a new pagination instance, clamping the limit to `1..=MAX_LIMIT`.
    pub fn new(limit: usize, offset: usize) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset,
        }
    }

    /// Applies this window to an already ordered sequence.
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect()
    }
}

impl Default for OffsetPagination {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped() {
        assert_eq!(OffsetPagination::new(0, 0).limit, 1);
        assert_eq!(OffsetPagination::new(1_000, 0).limit, MAX_LIMIT);
    }

    #[test]
    fn apply_skips_and_takes() {
        let page = OffsetPagination::new(2, 3).apply(0..10);
        assert_eq!(page, vec![3, 4]);

        let past_end = OffsetPagination::new(5, 20).apply(0..10);
        assert!(past_end.is_empty());
    }
}
