//! Repository traits and their implementations for [`MemoryStore`].
//!
//! Each repository exposes the operations one resource needs. Lookups of
//! missing rows return `Ok(None)`; mutations of missing rows return
//! [`StoreError::NotFound`].
//!
//! [`MemoryStore`]: crate::MemoryStore
//! [`StoreError::NotFound`]: crate::StoreError::NotFound

mod deck;
mod deck_code;
mod matches;
mod record;
mod user;

pub use deck::DeckRepository;
pub use deck_code::DeckCodeRepository;
pub use matches::MatchRepository;
pub use record::RecordRepository;
pub use user::UserRepository;
