use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::AppError;
use crate::leaderboard::LeaderboardService;
use crate::models::leaderboard::LeaderboardResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "Leaderboard",
    operation_id = "getLeaderboard",
    summary = "Ranked standings",
    description = "Users with at least one prediction, by total points. Ties are broken by username, and ranks are always consecutive.",
    responses(
        (status = 200, description = "Standings", body = LeaderboardResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn get_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let leaderboard = LeaderboardService::new(&state.db).standings().await?;
    Ok(Json(LeaderboardResponse {
        count: leaderboard.len(),
        leaderboard,
    }))
}
