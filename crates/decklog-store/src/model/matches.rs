//! Match and game models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::types::{HasCreatedAt, HasOwner};

/// One match played within a record.
///
/// Visibility of a match follows its record; the match has no privacy flag
/// of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Unique match identifier.
    pub id: Uuid,
    /// Record the match belongs to.
    pub record_id: Uuid,
    /// Owner of the match, always the owner of the record.
    pub user_uid: String,
    /// Deck the owner played, when it differs from the record's.
    pub deck_id: Option<Uuid>,
    /// What the opponent played.
    pub opponents_deck_info: Option<String>,
    /// Best-of-three when set, best-of-one otherwise.
    pub bo3: bool,
    /// Match was part of the qualifying rounds.
    pub qualifying_round: bool,
    /// Match was part of the final tournament.
    pub final_tournament: bool,
    /// Won without playing.
    pub default_victory: bool,
    /// Lost without playing.
    pub default_defeat: bool,
    /// Overall outcome for the owner.
    pub victory: bool,
    /// Free-form notes.
    pub memo: Option<String>,
    /// Games in the order they were played.
    pub games: Vec<Game>,
    /// Timestamp when the match was created.
    pub created_at: Timestamp,
    /// Timestamp when the match was last replaced.
    pub updated_at: Timestamp,
}

/// A single game within a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: Uuid,
    pub go_first: bool,
    pub winning: bool,
    pub your_prize_cards: u8,
    pub opponents_prize_cards: u8,
    pub memo: Option<String>,
}

/// Data for creating or replacing a match.
#[derive(Debug, Default, Clone)]
pub struct NewMatch {
    pub record_id: Uuid,
    pub user_uid: String,
    pub deck_id: Option<Uuid>,
    pub opponents_deck_info: Option<String>,
    pub bo3: bool,
    pub qualifying_round: bool,
    pub final_tournament: bool,
    pub default_victory: bool,
    pub default_defeat: bool,
    pub victory: bool,
    pub memo: Option<String>,
    pub games: Vec<NewGame>,
}

/// Data for one game of a [`NewMatch`].
#[derive(Debug, Default, Clone)]
pub struct NewGame {
    pub go_first: bool,
    pub winning: bool,
    pub your_prize_cards: u8,
    pub opponents_prize_cards: u8,
    pub memo: Option<String>,
}

impl Match {
    pub(crate) fn from_new(new: NewMatch) -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::now_v7(),
            record_id: new.record_id,
            user_uid: new.user_uid,
            deck_id: new.deck_id,
            opponents_deck_info: new.opponents_deck_info,
            bo3: new.bo3,
            qualifying_round: new.qualifying_round,
            final_tournament: new.final_tournament,
            default_victory: new.default_victory,
            default_defeat: new.default_defeat,
            victory: new.victory,
            memo: new.memo,
            games: new.games.into_iter().map(Game::from_new).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites every field but the identity and creation time.
    pub(crate) fn replace(&mut self, new: NewMatch) {
        let replaced = Self::from_new(new);
        *self = Self {
            id: self.id,
            created_at: self.created_at,
            ..replaced
        };
    }
}

impl Game {
    fn from_new(new: NewGame) -> Self {
        Self {
            id: Uuid::now_v7(),
            go_first: new.go_first,
            winning: new.winning,
            your_prize_cards: new.your_prize_cards,
            opponents_prize_cards: new.opponents_prize_cards,
            memo: new.memo,
        }
    }
}

impl HasOwner for Match {
    fn owner_uid(&self) -> &str {
        &self.user_uid
    }
}

impl HasCreatedAt for Match {
    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
