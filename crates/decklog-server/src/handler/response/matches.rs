//! Match response types.

use decklog_store::model;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One game of a match.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Unique game identifier.
    pub game_id: Uuid,
    /// Whether the reporting player went first.
    pub go_first: bool,
    /// Whether the reporting player won the game.
    pub winning: bool,
    /// Prize cards taken by the reporting player.
    pub your_prize_cards: u8,
    /// Prize cards taken by the opponent.
    pub opponents_prize_cards: u8,
    /// Free-form note.
    pub memo: Option<String>,
}

impl From<model::Game> for Game {
    fn from(game: model::Game) -> Self {
        Self {
            game_id: game.id,
            go_first: game.go_first,
            winning: game.winning,
            your_prize_cards: game.your_prize_cards,
            opponents_prize_cards: game.opponents_prize_cards,
            memo: game.memo,
        }
    }
}

/// Match response.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Unique match identifier.
    pub match_id: Uuid,
    /// Record the match belongs to.
    pub record_id: Uuid,
    /// Token subject of the reporting player.
    pub user_uid: String,
    /// Deck played in the match.
    pub deck_id: Option<Uuid>,
    /// Description of the opponent's deck.
    pub opponents_deck_info: Option<String>,
    /// Best-of-3 instead of best-of-1.
    pub bo3: bool,
    /// Played in a qualifying round.
    pub qualifying_round: bool,
    /// Played in the final tournament.
    pub final_tournament: bool,
    /// Won without playing.
    pub default_victory: bool,
    /// Lost without playing.
    pub default_defeat: bool,
    /// Overall result for the reporting player.
    pub victory: bool,
    /// Free-form note.
    pub memo: Option<String>,
    /// Games in the order they were played.
    pub games: Vec<Game>,
    /// Timestamp when the match was reported.
    pub created_at: Timestamp,
    /// Timestamp when the match was last replaced.
    pub updated_at: Timestamp,
}

impl From<model::Match> for Match {
    fn from(reported: model::Match) -> Self {
        Self {
            match_id: reported.id,
            record_id: reported.record_id,
            user_uid: reported.user_uid,
            deck_id: reported.deck_id,
            opponents_deck_info: reported.opponents_deck_info,
            bo3: reported.bo3,
            qualifying_round: reported.qualifying_round,
            final_tournament: reported.final_tournament,
            default_victory: reported.default_victory,
            default_defeat: reported.default_defeat,
            victory: reported.victory,
            memo: reported.memo,
            games: reported.games.into_iter().map(Into::into).collect(),
            created_at: reported.created_at,
            updated_at: reported.updated_at,
        }
    }
}

/// Response for listing matches.
pub type MatchesPage = super::Page<Match>;
