//! Shared types used by models and repositories.

mod pagination;
mod traits;

pub use pagination::{MAX_LIMIT, OffsetPagination};
pub use traits::{HasCreatedAt, HasOwner};
