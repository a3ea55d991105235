//! Request types for HTTP handlers.

mod deck_codes;
mod decks;
mod matches;
mod paginations;
mod paths;
mod records;
mod users;

pub use deck_codes::*;
pub use decks::*;
pub use matches::*;
pub use paginations::*;
pub use paths::*;
pub use records::*;
pub use users::*;
