//! Match report request types.

use decklog_store::model::{NewGame, NewMatch};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validate::{GameOutcome, MatchPayload};

/// One game of a reported match.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GameReport {
    /// Whether the reporting player went first.
    #[serde(default)]
    pub go_first: bool,
    /// Whether the reporting player won the game.
    #[serde(default)]
    pub winning: bool,
    /// Prize cards taken by the reporting player (0-6).
    #[serde(default)]
    #[validate(range(max = 6))]
    pub your_prize_cards: u8,
    /// Prize cards taken by the opponent (0-6).
    #[serde(default)]
    #[validate(range(max = 6))]
    pub opponents_prize_cards: u8,
    /// Free-form note (max 1024 characters).
    #[validate(length(max = 1024))]
    pub memo: Option<String>,
}

impl From<GameReport> for NewGame {
    fn from(game: GameReport) -> Self {
        Self {
            go_first: game.go_first,
            winning: game.winning,
            your_prize_cards: game.your_prize_cards,
            opponents_prize_cards: game.opponents_prize_cards,
            memo: game.memo,
        }
    }
}

/// Request payload for creating or replacing a match.
///
/// The report must be consistent with its format before it is stored:
/// default flags exclude games, and games must agree with `victory`.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    /// Record the match belongs to. Required.
    pub record_id: Option<Uuid>,
    /// Deck played in the match.
    pub deck_id: Option<Uuid>,
    /// Description of the opponent's deck (max 256 characters).
    #[validate(length(max = 256))]
    pub opponents_deck_info: Option<String>,
    /// Best-of-3 instead of best-of-1.
    #[serde(default)]
    pub bo3: bool,
    /// Played in a qualifying round.
    #[serde(default)]
    pub qualifying_round: bool,
    /// Played in the final tournament.
    #[serde(default)]
    pub final_tournament: bool,
    /// Won without playing.
    #[serde(default)]
    pub default_victory: bool,
    /// Lost without playing.
    #[serde(default)]
    pub default_defeat: bool,
    /// Overall result for the reporting player.
    #[serde(default)]
    pub victory: bool,
    /// Free-form note (max 1024 characters).
    #[validate(length(max = 1024))]
    pub memo: Option<String>,
    /// Games in the order they were played.
    #[serde(default)]
    #[validate(nested)]
    pub games: Vec<GameReport>,
}

impl MatchReport {
    /// Returns the fields the consistency check looks at.
    pub fn payload(&self) -> MatchPayload {
        MatchPayload {
            record_id: self.record_id,
            bo3: self.bo3,
            default_victory: self.default_victory,
            default_defeat: self.default_defeat,
            victory: self.victory,
            games: self
                .games
                .iter()
                .map(|game| GameOutcome::new(game.winning))
                .collect(),
        }
    }

    /// Converts this report into a [`NewMatch`] under `record_id`.
    pub fn into_model(self, uid: &str, record_id: Uuid) -> NewMatch {
        NewMatch {
            record_id,
            user_uid: uid.to_owned(),
            deck_id: self.deck_id,
            opponents_deck_info: self.opponents_deck_info,
            bo3: self.bo3,
            qualifying_round: self.qualifying_round,
            final_tournament: self.final_tournament,
            default_victory: self.default_victory,
            default_defeat: self.default_defeat,
            victory: self.victory,
            memo: self.memo,
            games: self.games.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_flags_default_to_false() -> anyhow::Result<()> {
        let report: MatchReport = serde_json::from_str(r#"{"recordId": null}"#)?;
        let payload = report.payload();
        assert!(payload.record_id.is_none());
        assert!(!payload.bo3 && !payload.victory && payload.games.is_empty());
        Ok(())
    }

    #[test]
    fn prize_cards_are_bounded() {
        let report = MatchReport {
            games: vec![GameReport {
                your_prize_cards: 7,
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(report.validate().is_err());
    }
}
