//! Store models.
//!
//! Each model comes with a `New*` change set used on insert and, where the
//! resource supports partial edits, an `Update*` change set where `None`
//! leaves the column untouched.

mod deck;
mod deck_code;
mod matches;
mod record;
mod user;

pub use deck::{Deck, NewDeck, UpdateDeck};
pub use deck_code::{DeckCode, NewDeckCode, UpdateDeckCode};
pub use matches::{Game, Match, NewGame, NewMatch};
pub use record::{NewRecord, Record, UpdateRecord};
pub use user::{NewUser, UpdateUser, User};
