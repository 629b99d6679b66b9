//! Normalized fixture data as reported by the upstream feed.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::match_result::encode_result;

/// Round-label prefixes tried in order when deriving a matchday.
///
/// The first prefix that yields a non-zero number wins.
pub const MATCHDAY_PATTERNS: &[&str] = &["Regular Season - ", "Matchday "];

/// Why a single feed entry could not be turned into a [`FixtureRecord`].
#[derive(Debug, Error)]
pub enum RecordParseError {
    #[error("invalid kickoff timestamp {raw:?}: {source}")]
    InvalidKickoff {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("fixture is missing the {0} team name")]
    MissingTeam(&'static str),
}

/// One fixture from the feed, after translation out of the provider format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureRecord {
    pub home_team: String,
    pub away_team: String,
    pub kickoff: DateTime<FixedOffset>,
    /// Provider-specific round label, e.g. "Regular Season - 12".
    pub round: String,
    pub home_goals: Option<i32>,
    pub away_goals: Option<i32>,
}

impl FixtureRecord {
    /// Build a record from raw provider fields.
    pub fn from_raw(
        home_team: &str,
        away_team: &str,
        kickoff: &str,
        round: &str,
        home_goals: Option<i32>,
        away_goals: Option<i32>,
    ) -> Result<Self, RecordParseError> {
        let kickoff = parse_kickoff(kickoff)?;
        if home_team.is_empty() {
            return Err(RecordParseError::MissingTeam("home"));
        }
        if away_team.is_empty() {
            return Err(RecordParseError::MissingTeam("away"));
        }

        Ok(Self {
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            kickoff,
            round: round.to_string(),
            home_goals,
            away_goals,
        })
    }

    /// Kickoff in its stored string form. Part of the natural key.
    pub fn kickoff_key(&self) -> String {
        format_kickoff(&self.kickoff)
    }

    pub fn matchday(&self) -> i32 {
        extract_matchday(&self.round)
    }

    /// Result in stored form, or the unplayed sentinel when either goal is absent.
    pub fn result(&self) -> String {
        encode_result(self.home_goals, self.away_goals)
    }

    pub fn is_finished(&self) -> bool {
        self.home_goals.is_some() && self.away_goals.is_some()
    }
}

/// Parse an RFC 3339 kickoff timestamp, keeping its UTC offset.
pub fn parse_kickoff(raw: &str) -> Result<DateTime<FixedOffset>, RecordParseError> {
    DateTime::parse_from_rfc3339(raw).map_err(|source| RecordParseError::InvalidKickoff {
        raw: raw.to_string(),
        source,
    })
}

/// Canonical kickoff string: second precision, `Z` for a zero offset.
pub fn format_kickoff(kickoff: &DateTime<FixedOffset>) -> String {
    kickoff.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Derive a matchday number from a free-text round label.
///
/// Returns 0 when no pattern matches.
pub fn extract_matchday(round: &str) -> i32 {
    MATCHDAY_PATTERNS
        .iter()
        .filter_map(|prefix| round.strip_prefix(prefix).and_then(leading_int))
        .find(|&day| day != 0)
        .unwrap_or(0)
}

/// Parse the unsigned integer at the start of `s`, ignoring trailing text.
fn leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    s[..digits].parse().ok()
}
