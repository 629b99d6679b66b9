//! Wire types for the provider's `/fixtures` response.
//!
//! Every field is optional on the wire. Missing or `null` values fall back to
//! their defaults so that one sloppy entry only drops that entry.

use common::{FixtureRecord, RecordParseError};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use super::FeedError;

#[derive(Debug, Default, Deserialize)]
pub struct FixturesEnvelope {
    /// `[]` on success, an object or non-empty array of messages on failure.
    #[serde(default)]
    pub errors: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FixtureEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub fixture: FixtureInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub league: LeagueInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub teams: Teams,
    #[serde(deserialize_with = "null_as_default")]
    pub score: ScoreInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FixtureInfo {
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LeagueInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub round: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Teams {
    #[serde(deserialize_with = "null_as_default")]
    pub home: TeamInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub away: TeamInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TeamInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScoreInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub fulltime: Goals,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Goals {
    pub home: Option<i32>,
    pub away: Option<i32>,
}

impl FixtureEntry {
    pub fn into_record(self) -> Result<FixtureRecord, RecordParseError> {
        FixtureRecord::from_raw(
            &self.teams.home.name,
            &self.teams.away.name,
            &self.fixture.date,
            &self.league.round,
            self.score.fulltime.home,
            self.score.fulltime.away,
        )
    }
}

/// Treat an explicit JSON `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn has_provider_errors(errors: &Value) -> bool {
    match errors {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
        _ => false,
    }
}

/// Translate a raw `/fixtures` body into normalized records.
///
/// Entries that fail to decode or validate are logged and skipped. Only an
/// unreadable envelope or a provider-reported error fails the whole batch.
pub fn parse_fixtures(body: &str) -> Result<Vec<FixtureRecord>, FeedError> {
    let envelope: FixturesEnvelope = serde_json::from_str(body)?;
    if has_provider_errors(&envelope.errors) {
        return Err(FeedError::Provider(envelope.errors.to_string()));
    }

    let total = envelope.response.len();
    let records: Vec<FixtureRecord> = envelope
        .response
        .into_iter()
        .filter_map(|raw| {
            let entry = match serde_json::from_value::<FixtureEntry>(raw) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Dropping undecodable fixture entry");
                    return None;
                }
            };
            let fixture_id = entry.fixture.id;
            entry
                .into_record()
                .inspect_err(|e| warn!(?fixture_id, error = %e, "Dropping fixture entry"))
                .ok()
        })
        .collect();

    if records.len() < total {
        warn!(
            kept = records.len(),
            dropped = total - records.len(),
            "Some fixture entries were dropped"
        );
    }
    Ok(records)
}
