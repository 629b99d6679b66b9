use std::fmt;

use serde::{Deserialize, Serialize};

/// Stored result of a match that has not been played yet.
///
/// A genuine 0:0 final encodes to the same string, so the two states cannot be
/// told apart once persisted. Scoring treats both as "no result".
pub const UNPLAYED_SENTINEL: &str = "0:0";

/// A final score, home goals first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Scoreline {
    pub home: i32,
    pub away: i32,
}

impl Scoreline {
    pub fn new(home: i32, away: i32) -> Self {
        Self { home, away }
    }

    /// Widened so extreme stored scores cannot overflow.
    pub fn total_goals(&self) -> i64 {
        i64::from(self.home) + i64::from(self.away)
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.home) - i64::from(self.away)
    }
}

impl fmt::Display for Scoreline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.home, self.away)
    }
}

/// Interpretation of a stored `"<home>:<away>"` result string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParsedResult {
    /// Empty string or the `"0:0"` sentinel.
    Unplayed,
    /// A well-formed, non-sentinel score.
    Final(Scoreline),
    /// Anything else: wrong number of parts or a non-numeric component.
    Malformed,
}

impl ParsedResult {
    pub fn scoreline(&self) -> Option<Scoreline> {
        match self {
            Self::Final(score) => Some(*score),
            _ => None,
        }
    }
}

/// Parse a stored result string.
///
/// The sentinel check runs on the raw string before any splitting, so `"00:0"`
/// is a real (if odd) 0:0 final while `"0:0"` is not.
pub fn parse_result(raw: &str) -> ParsedResult {
    if raw.is_empty() || raw == UNPLAYED_SENTINEL {
        return ParsedResult::Unplayed;
    }

    let mut parts = raw.split(':');
    let (Some(home), Some(away), None) = (parts.next(), parts.next(), parts.next()) else {
        return ParsedResult::Malformed;
    };

    match (home.parse::<i32>(), away.parse::<i32>()) {
        (Ok(home), Ok(away)) => ParsedResult::Final(Scoreline::new(home, away)),
        _ => ParsedResult::Malformed,
    }
}

/// Encode feed goals into the stored result format.
///
/// Both goals must be present; otherwise the match is unplayed.
pub fn encode_result(home: Option<i32>, away: Option<i32>) -> String {
    match (home, away) {
        (Some(home), Some(away)) => Scoreline::new(home, away).to_string(),
        _ => UNPLAYED_SENTINEL.to_string(),
    }
}
