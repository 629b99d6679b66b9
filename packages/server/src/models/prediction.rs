use chrono::{DateTime, Utc};
use common::{ScoreBreakdown, scoring};
use serde::{Deserialize, Serialize};

use crate::entity::{football_match, prediction};
use crate::models::matches::MatchResponse;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreatePredictionRequest {
    #[schema(example = 1)]
    pub match_id: i32,
    #[schema(example = 2)]
    pub predicted_score_home: i32,
    #[schema(example = 1)]
    pub predicted_score_away: i32,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdatePredictionRequest {
    #[schema(example = 2)]
    pub predicted_score_home: i32,
    #[schema(example = 2)]
    pub predicted_score_away: i32,
}

/// A prediction with the rules it currently satisfies.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PredictionResponse {
    #[schema(example = 7)]
    pub id: i32,
    #[schema(example = 42)]
    pub user_id: i32,
    #[schema(example = 1)]
    pub match_id: i32,
    #[schema(example = 2)]
    pub predicted_score_home: i32,
    #[schema(example = 1)]
    pub predicted_score_away: i32,
    /// Stored award, as of the last create/update.
    #[schema(example = 20)]
    pub points: i32,
    pub breakdown: ScoreBreakdown,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PredictionResponse {
    pub fn new(p: prediction::Model, game: &football_match::Model) -> Self {
        Self {
            breakdown: scoring::breakdown(p.predicted_score_home, p.predicted_score_away, &game.result),
            id: p.id,
            user_id: p.user_id,
            match_id: p.match_id,
            predicted_score_home: p.predicted_score_home,
            predicted_score_away: p.predicted_score_away,
            points: p.points,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// A prediction joined with its match.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserPredictionResponse {
    #[serde(flatten)]
    pub prediction: PredictionResponse,
    #[serde(rename = "match")]
    pub football_match: MatchResponse,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UserPredictionListResponse {
    pub data: Vec<UserPredictionResponse>,
    #[schema(example = 12)]
    pub count: usize,
}
