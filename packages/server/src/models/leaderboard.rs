use common::LeaderboardEntry;
use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
    #[schema(example = 25)]
    pub count: usize,
}
