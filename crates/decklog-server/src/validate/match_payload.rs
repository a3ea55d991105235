use uuid::Uuid;

use crate::TRACING_TARGET_VALIDATION;
use crate::handler::{Error, ErrorKind};

/// Outcome of one game, the only game field that affects validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameOutcome {
    pub winning: bool,
}

impl GameOutcome {
    #[inline]
    pub const fn new(winning: bool) -> Self {
        Self { winning }
    }
}

/// The validated view of a match report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchPayload {
    pub record_id: Option<Uuid>,
    pub bo3: bool,
    pub default_victory: bool,
    pub default_defeat: bool,
    pub victory: bool,
    pub games: Vec<GameOutcome>,
}

/// Why a match report was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    #[error("record id is missing")]
    MissingRecord,
    #[error("default victory and default defeat are both set")]
    ConflictingDefaults,
    #[error("default victory requires victory")]
    DefaultVictoryNotWon,
    #[error("default defeat requires no victory")]
    DefaultDefeatWon,
    #[error("a defaulted match has no games")]
    DefaultWithGames,
    #[error("best-of-1 allows at most one game, got {0}")]
    TooManyGames(usize),
    #[error("best-of-1 game outcome differs from the match outcome")]
    SingleGameMismatch,
    #[error("best-of-3 cannot have {0} games")]
    InvalidGameCount(usize),
    #[error("best-of-3 sweep must agree with the match outcome")]
    SweepMismatch,
    #[error("best-of-3 first two games must split")]
    FirstGamesNotSplit,
    #[error("best-of-3 deciding game is inconsistent with the match outcome")]
    ParityViolation,
}

impl From<Malformed> for Error<'static> {
    fn from(reason: Malformed) -> Self {
        ErrorKind::BadRequest
            .with_message(reason.to_string())
            .with_resource("match")
    }
}

/// Validates a match report.
///
/// Default flags are checked first; a defaulted match is accepted without
/// game shape rules. Otherwise the games must fit the declared format and
/// agree with `victory`. Reports with no games yet are accepted.
pub fn validate(payload: &MatchPayload) -> Result<(), Malformed> {
    let result = check(payload);

    if let Err(reason) = result {
        tracing::debug!(
            target: TRACING_TARGET_VALIDATION,
            bo3 = payload.bo3,
            games = payload.games.len(),
            reason = %reason,
            "match report rejected",
        );
    }

    result
}

fn check(payload: &MatchPayload) -> Result<(), Malformed> {
    if payload.record_id.is_none() {
        return Err(Malformed::MissingRecord);
    }

    if payload.default_victory && payload.default_defeat {
        return Err(Malformed::ConflictingDefaults);
    }

    if payload.default_victory && !payload.victory {
        return Err(Malformed::DefaultVictoryNotWon);
    }

    if payload.default_defeat && payload.victory {
        return Err(Malformed::DefaultDefeatWon);
    }

    if payload.default_victory || payload.default_defeat {
        if !payload.games.is_empty() {
            return Err(Malformed::DefaultWithGames);
        }
        return Ok(());
    }

    if payload.bo3 {
        check_best_of_three(&payload.games, payload.victory)
    } else {
        check_best_of_one(&payload.games, payload.victory)
    }
}

fn check_best_of_one(games: &[GameOutcome], victory: bool) -> Result<(), Malformed> {
    match games {
        [] => Ok(()),
        [game] if game.winning == victory => Ok(()),
        [_] => Err(Malformed::SingleGameMismatch),
        games => Err(Malformed::TooManyGames(games.len())),
    }
}

fn check_best_of_three(games: &[GameOutcome], victory: bool) -> Result<(), Malformed> {
    match games {
        [] => Ok(()),
        [first, second] => {
            if first.winning == victory && second.winning == victory {
                Ok(())
            } else {
                Err(Malformed::SweepMismatch)
            }
        }
        [first, second, third] => {
            if first.winning == second.winning {
                return Err(Malformed::FirstGamesNotSplit);
            }

            // Odd number of true values among the three games and victory.
            if first.winning ^ second.winning ^ third.winning ^ victory {
                Ok(())
            } else {
                Err(Malformed::ParityViolation)
            }
        }
        games => Err(Malformed::InvalidGameCount(games.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOLS: [bool; 2] = [false, true];

    fn payload(bo3: bool, victory: bool, games: &[bool]) -> MatchPayload {
        MatchPayload {
            record_id: Some(Uuid::nil()),
            bo3,
            victory,
            games: games.iter().copied().map(GameOutcome::new).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn missing_record_is_malformed() {
        let payload = MatchPayload {
            record_id: None,
            ..payload(false, true, &[true])
        };
        assert_eq!(validate(&payload), Err(Malformed::MissingRecord));
    }

    #[test]
    fn both_default_flags_always_malformed() {
        for bo3 in BOOLS {
            for victory in BOOLS {
                let payload = MatchPayload {
                    default_victory: true,
                    default_defeat: true,
                    ..payload(bo3, victory, &[])
                };
                assert_eq!(validate(&payload), Err(Malformed::ConflictingDefaults));
            }
        }
    }

    #[test]
    fn default_victory_without_victory() {
        let payload = MatchPayload {
            default_victory: true,
            ..payload(false, false, &[])
        };
        assert_eq!(validate(&payload), Err(Malformed::DefaultVictoryNotWon));
    }

    #[test]
    fn default_defeat_with_victory() {
        let payload = MatchPayload {
            default_defeat: true,
            ..payload(true, true, &[])
        };
        assert_eq!(validate(&payload), Err(Malformed::DefaultDefeatWon));
    }

    #[test]
    fn defaulted_match_has_no_games() {
        let with_games = MatchPayload {
            default_victory: true,
            ..payload(true, true, &[true, true])
        };
        assert_eq!(validate(&with_games), Err(Malformed::DefaultWithGames));

        let without_games = MatchPayload {
            default_defeat: true,
            ..payload(true, false, &[])
        };
        assert_eq!(validate(&without_games), Ok(()));
    }

    #[test]
    fn best_of_one_single_game_matches_victory() {
        for winning in BOOLS {
            for victory in BOOLS {
                let result = validate(&payload(false, victory, &[winning]));
                assert_eq!(result.is_ok(), winning == victory);
            }
        }
    }

    #[test]
    fn best_of_one_game_counts() {
        assert_eq!(validate(&payload(false, true, &[])), Ok(()));
        assert_eq!(
            validate(&payload(false, true, &[true, true])),
            Err(Malformed::TooManyGames(2))
        );
    }

    #[test]
    fn best_of_three_game_counts() {
        assert_eq!(validate(&payload(true, false, &[])), Ok(()));
        assert_eq!(
            validate(&payload(true, true, &[true])),
            Err(Malformed::InvalidGameCount(1))
        );
        assert_eq!(
            validate(&payload(true, true, &[true, false, true, true])),
            Err(Malformed::InvalidGameCount(4))
        );
    }

    #[test]
    fn best_of_three_sweep_agrees_with_victory() {
        for first in BOOLS {
            for second in BOOLS {
                for victory in BOOLS {
                    let result = validate(&payload(true, victory, &[first, second]));
                    let expected = first == victory && second == victory;
                    assert_eq!(result.is_ok(), expected, "{first} {second} {victory}");
                }
            }
        }
    }

    #[test]
    fn best_of_three_full_truth_table() {
        for first in BOOLS {
            for second in BOOLS {
                for third in BOOLS {
                    for victory in BOOLS {
                        let result = validate(&payload(true, victory, &[first, second, third]));
                        let expected = first != second && (first ^ second ^ third ^ victory);
                        assert_eq!(
                            result.is_ok(),
                            expected,
                            "{first} {second} {third} {victory}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn split_with_won_decider() {
        let result = validate(&payload(true, true, &[true, false, true]));
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn sweep_against_declared_loss() {
        let result = validate(&payload(true, false, &[true, true]));
        assert_eq!(result, Err(Malformed::SweepMismatch));
    }

    #[test]
    fn unsplit_first_games_with_third() {
        let result = validate(&payload(true, true, &[true, true, false]));
        assert_eq!(result, Err(Malformed::FirstGamesNotSplit));
    }

    #[test]
    fn malformed_maps_to_bad_request() {
        let error: Error = Malformed::ParityViolation.into();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
    }
}
