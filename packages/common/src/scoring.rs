//! Point award for a single prediction against an authoritative result.
//!
//! Four rules are evaluated independently and summed, so a perfect prediction
//! collects every award at once. Scoring never fails: an unplayed or malformed
//! result yields zero points.

use serde::{Deserialize, Serialize};

use crate::match_result::{ParsedResult, Scoreline, parse_result};

pub const EXACT_SCORE_POINTS: i32 = 10;
pub const OUTCOME_POINTS: i32 = 5;
pub const TOTAL_GOALS_POINTS: i32 = 3;
pub const GOAL_DIFFERENCE_POINTS: i32 = 2;

/// Which side a scoreline favours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl Outcome {
    pub fn of(home: i32, away: i32) -> Self {
        if home > away {
            Self::HomeWin
        } else if away > home {
            Self::AwayWin
        } else {
            Self::Draw
        }
    }
}

/// The rules that fired for one prediction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ScoreBreakdown {
    /// Predicted home and away goals both match.
    pub exact_score: bool,
    /// Predicted home-win / away-win / draw matches.
    pub outcome: bool,
    /// Predicted total goals match.
    pub total_goals: bool,
    /// Predicted goal difference (home minus away) matches.
    pub goal_difference: bool,
}

impl ScoreBreakdown {
    /// Evaluate all four rules against a known final score.
    pub fn evaluate(predicted: Scoreline, actual: Scoreline) -> Self {
        Self {
            exact_score: predicted == actual,
            outcome: Outcome::of(predicted.home, predicted.away)
                == Outcome::of(actual.home, actual.away),
            total_goals: predicted.total_goals() == actual.total_goals(),
            goal_difference: predicted.goal_difference() == actual.goal_difference(),
        }
    }

    pub fn points(&self) -> i32 {
        let mut points = 0;
        if self.exact_score {
            points += EXACT_SCORE_POINTS;
        }
        if self.outcome {
            points += OUTCOME_POINTS;
        }
        if self.total_goals {
            points += TOTAL_GOALS_POINTS;
        }
        if self.goal_difference {
            points += GOAL_DIFFERENCE_POINTS;
        }
        points
    }
}

/// Rule breakdown for a prediction against a stored result string.
///
/// Returns an all-false breakdown when the result is unplayed or malformed.
pub fn breakdown(predicted_home: i32, predicted_away: i32, result: &str) -> ScoreBreakdown {
    match parse_result(result) {
        ParsedResult::Final(actual) => {
            ScoreBreakdown::evaluate(Scoreline::new(predicted_home, predicted_away), actual)
        }
        ParsedResult::Unplayed | ParsedResult::Malformed => ScoreBreakdown::default(),
    }
}

/// Points for a prediction against a stored result string.
pub fn score(predicted_home: i32, predicted_away: i32, result: &str) -> i32 {
    breakdown(predicted_home, predicted_away, result).points()
}
