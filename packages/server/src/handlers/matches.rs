use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{football_match, prediction};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::ingest::{IngestReport, find_by_natural_key, refresh_from_feed, sync_from_feed};
use crate::models::matches::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Matches",
    operation_id = "listMatches",
    summary = "List all matches",
    description = "Pulls the latest fixtures from the provider first (when enabled), then returns every stored match ordered by kickoff. Provider failures are logged and the stored matches are returned anyway.",
    responses(
        (status = 200, description = "All matches", body = MatchListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_matches(
    State(state): State<AppState>,
) -> Result<Json<MatchListResponse>, AppError> {
    if state.config.feed.refresh_on_read {
        refresh_from_feed(&state.db, state.feed.as_ref(), &state.config.feed).await;
    }

    let data: Vec<MatchResponse> = football_match::Entity::find()
        .order_by_asc(football_match::Column::Date)
        .order_by_asc(football_match::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(MatchListResponse {
        count: data.len(),
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/gameweek/{gameweek}",
    tag = "Matches",
    operation_id = "listMatchesByGameweek",
    summary = "List the matches of one matchday",
    params(("gameweek" = String, Path, description = "Matchday number")),
    responses(
        (status = 200, description = "Matches of the matchday", body = GameweekResponse),
        (status = 400, description = "Non-numeric gameweek (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_by_gameweek(
    State(state): State<AppState>,
    Path(gameweek): Path<String>,
) -> Result<Json<GameweekResponse>, AppError> {
    let gameweek: i32 = gameweek
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("Invalid gameweek number".into()))?;

    let data: Vec<MatchResponse> = football_match::Entity::find()
        .filter(football_match::Column::MatchDay.eq(gameweek))
        .order_by_asc(football_match::Column::Date)
        .order_by_asc(football_match::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(GameweekResponse {
        count: data.len(),
        gameweek,
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/details/{id}",
    tag = "Matches",
    operation_id = "getMatchDetails",
    summary = "Get a match with its prediction count",
    params(("id" = i32, Path, description = "Match ID")),
    responses(
        (status = 200, description = "Match details", body = MatchDetailsResponse),
        (status = 404, description = "Match not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(match_id = id))]
pub async fn get_match_details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MatchDetailsResponse>, AppError> {
    let model = football_match::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Match not found".into()))?;

    let prediction_count = prediction::Entity::find()
        .filter(prediction::Column::MatchId.eq(id))
        .count(&state.db)
        .await?;

    Ok(Json(MatchDetailsResponse {
        football_match: model.into(),
        prediction_count,
    }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Matches",
    operation_id = "createMatches",
    summary = "Insert matches manually",
    description = "Inserts a batch of matches in one transaction. Any natural-key collision (same home team, away team and kickoff) rejects the whole batch.",
    request_body = Vec<CreateMatchRequest>,
    responses(
        (status = 201, description = "Matches created", body = CreateMatchesResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 409, description = "Match already exists (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id, count = payload.len()))]
pub async fn create_matches(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<Vec<CreateMatchRequest>>,
) -> Result<impl IntoResponse, AppError> {
    if payload.is_empty() {
        return Err(AppError::Validation("At least one match is required".into()));
    }
    let kickoffs = payload
        .iter()
        .map(validate_create_match)
        .collect::<Result<Vec<_>, _>>()?;

    let txn = state.db.begin().await?;
    let mut created = Vec::with_capacity(payload.len());

    for (item, date) in payload.into_iter().zip(kickoffs) {
        let home_team = item.home_team.trim().to_string();
        let away_team = item.away_team.trim().to_string();
        let conflict = format!("Match {} vs {} at {} already exists", home_team, away_team, date);

        if find_by_natural_key(&txn, &home_team, &away_team, &date)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(conflict));
        }

        let model = football_match::ActiveModel {
            home_team: Set(home_team),
            away_team: Set(away_team),
            date: Set(date),
            league: Set(item.league),
            season: Set(item.season),
            match_day: Set(item.match_day),
            result: Set(item.result),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::from_insert(e, &conflict))?;

        created.push(MatchResponse::from(model));
    }

    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateMatchesResponse {
            count: created.len(),
            data: created,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/sync",
    tag = "Matches",
    operation_id = "syncMatches",
    summary = "Pull fixtures from the provider now",
    description = "Runs one ingestion pass and reports how many records were inserted, skipped as already stored, or failed.",
    responses(
        (status = 200, description = "Ingestion report", body = IngestReport),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 502, description = "Feed disabled or unavailable (UPSTREAM_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn sync_matches(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<IngestReport>, AppError> {
    let feed = state
        .feed
        .as_ref()
        .ok_or_else(|| AppError::Upstream("Fixture feed is not configured".into()))?;

    let report = sync_from_feed(&state.db, feed, &state.config.feed).await?;
    Ok(Json(report))
}
