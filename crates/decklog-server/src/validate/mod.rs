//! Structural consistency of match reports.
//!
//! [`validate`] is a pure check of a [`MatchPayload`] against the rules of
//! best-of-1 and best-of-3 play. It never touches the store and is run
//! identically for creating and replacing a match.

mod match_payload;

pub use self::match_payload::{GameOutcome, Malformed, MatchPayload, validate};
