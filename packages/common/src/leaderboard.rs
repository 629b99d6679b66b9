//! Ranking of users by their accumulated prediction points.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Aggregated points for one user, before ranking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserTotals {
    pub user_id: i32,
    pub username: String,
    pub total_points: i64,
    pub prediction_count: i64,
}

/// A ranked leaderboard row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LeaderboardEntry {
    #[schema(example = 42)]
    pub user_id: i32,
    #[schema(example = "alice_wonder")]
    pub username: String,
    #[schema(example = 135)]
    pub total_points: i64,
    #[schema(example = 19)]
    pub prediction_count: i64,
    /// 1-based position. Equal totals still get distinct, consecutive ranks.
    #[schema(example = 1)]
    pub rank: u32,
}

/// Order totals and assign sequential ranks.
///
/// Sorted by points descending, then username ascending, then user id ascending,
/// so the output is the same for the same input regardless of arrival order.
pub fn rank_standings(mut totals: Vec<UserTotals>) -> Vec<LeaderboardEntry> {
    totals.sort_by(compare_standing);
    totals
        .into_iter()
        .zip(1u32..)
        .map(|(t, rank)| LeaderboardEntry {
            user_id: t.user_id,
            username: t.username,
            total_points: t.total_points,
            prediction_count: t.prediction_count,
            rank,
        })
        .collect()
}

fn compare_standing(a: &UserTotals, b: &UserTotals) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then_with(|| a.username.cmp(&b.username))
        .then_with(|| a.user_id.cmp(&b.user_id))
}
