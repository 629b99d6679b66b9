use chrono::{DateTime, Utc};
use common::fixture::{format_kickoff, parse_kickoff};
use common::match_result::{ParsedResult, parse_result};
use serde::{Deserialize, Serialize};

use crate::entity::football_match;
use crate::error::AppError;

/// A stored match.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MatchResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Arsenal")]
    pub home_team: String,
    #[schema(example = "Chelsea")]
    pub away_team: String,
    /// Kickoff, RFC 3339.
    #[schema(example = "2024-09-14T11:30:00Z")]
    pub date: String,
    #[schema(example = "Premier League")]
    pub league: String,
    #[schema(example = "2024")]
    pub season: String,
    /// 0 when the round label carried no matchday.
    #[schema(example = 4)]
    pub match_day: i32,
    /// `"<home>:<away>"`; `"0:0"` or empty while unplayed.
    #[schema(example = "2:1")]
    pub result: String,
    pub created_at: DateTime<Utc>,
}

impl From<football_match::Model> for MatchResponse {
    fn from(m: football_match::Model) -> Self {
        Self {
            id: m.id,
            home_team: m.home_team,
            away_team: m.away_team,
            date: m.date,
            league: m.league,
            season: m.season,
            match_day: m.match_day,
            result: m.result,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MatchListResponse {
    pub data: Vec<MatchResponse>,
    #[schema(example = 380)]
    pub count: usize,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct GameweekResponse {
    pub data: Vec<MatchResponse>,
    #[schema(example = 4)]
    pub gameweek: i32,
    #[schema(example = 10)]
    pub count: usize,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MatchDetailsResponse {
    #[serde(rename = "match")]
    pub football_match: MatchResponse,
    /// Number of predictions placed on this match.
    #[schema(example = 17)]
    pub prediction_count: u64,
}

/// One match in a manual batch insert.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateMatchRequest {
    #[schema(example = "Arsenal")]
    pub home_team: String,
    #[schema(example = "Chelsea")]
    pub away_team: String,
    /// Kickoff, RFC 3339. Stored in canonical form.
    #[schema(example = "2024-09-14T11:30:00+00:00")]
    pub date: String,
    #[schema(example = "Premier League")]
    pub league: String,
    #[schema(example = "2024")]
    pub season: String,
    #[serde(default)]
    #[schema(example = 4)]
    pub match_day: i32,
    /// Omit or send `"0:0"` for an unplayed match.
    #[serde(default)]
    #[schema(example = "2:1")]
    pub result: String,
}

/// Validate a manual match and return its canonical kickoff string.
pub fn validate_create_match(payload: &CreateMatchRequest) -> Result<String, AppError> {
    if payload.home_team.trim().is_empty() || payload.away_team.trim().is_empty() {
        return Err(AppError::Validation("Team names must not be empty".into()));
    }
    let kickoff = parse_kickoff(payload.date.trim()).map_err(|e| AppError::Validation(e.to_string()))?;
    if payload.match_day < 0 {
        return Err(AppError::Validation("match_day must be >= 0".into()));
    }
    match parse_result(&payload.result) {
        ParsedResult::Malformed => {
            return Err(AppError::Validation(
                "result must look like \"<home>:<away>\"".into(),
            ));
        }
        ParsedResult::Final(score) if score.home < 0 || score.away < 0 => {
            return Err(AppError::Validation("result goals must be >= 0".into()));
        }
        _ => {}
    }
    Ok(format_kickoff(&kickoff))
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CreateMatchesResponse {
    pub data: Vec<MatchResponse>,
    #[schema(example = 2)]
    pub count: usize,
}
