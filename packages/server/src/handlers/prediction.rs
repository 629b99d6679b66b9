use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::football_match;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::prediction::*;
use crate::prediction::PredictionService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Predictions",
    operation_id = "createPrediction",
    summary = "Predict the score of a match",
    description = "Stores the caller's prediction and scores it against the match's current result. One prediction per user and match.",
    request_body = CreatePredictionRequest,
    responses(
        (status = 201, description = "Prediction created", body = PredictionResponse),
        (status = 400, description = "Negative scores (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Match not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Already predicted (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id, match_id = payload.match_id))]
pub async fn create_prediction(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePredictionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (saved, game) = PredictionService::new(&state.db)
        .create(
            auth_user.user_id,
            payload.match_id,
            payload.predicted_score_home,
            payload.predicted_score_away,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PredictionResponse::new(saved, &game)),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Predictions",
    operation_id = "getPredictionForMatch",
    summary = "Get the caller's prediction for a match",
    params(("id" = i32, Path, description = "Match ID (not a prediction ID)")),
    responses(
        (status = 200, description = "The prediction", body = PredictionResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "No prediction for this match (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_prediction(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(match_id): Path<i32>,
) -> Result<Json<PredictionResponse>, AppError> {
    let saved = PredictionService::new(&state.db)
        .find_for_match(auth_user.user_id, match_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Prediction not found".into()))?;

    let game = football_match::Entity::find_by_id(match_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Match not found".into()))?;

    Ok(Json(PredictionResponse::new(saved, &game)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Predictions",
    operation_id = "updatePrediction",
    summary = "Change a prediction",
    description = "Replaces the predicted scores of one of the caller's predictions and rescores it.",
    params(("id" = i32, Path, description = "Prediction ID")),
    request_body = UpdatePredictionRequest,
    responses(
        (status = 200, description = "Prediction updated", body = PredictionResponse),
        (status = 400, description = "Negative scores (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id, prediction_id = id))]
pub async fn update_prediction(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdatePredictionRequest>,
) -> Result<Json<PredictionResponse>, AppError> {
    let (saved, game) = PredictionService::new(&state.db)
        .update(
            auth_user.user_id,
            id,
            payload.predicted_score_home,
            payload.predicted_score_away,
        )
        .await?;

    Ok(Json(PredictionResponse::new(saved, &game)))
}

#[utoipa::path(
    get,
    path = "/my-predictions",
    tag = "Predictions",
    operation_id = "listMyPredictions",
    summary = "List the caller's predictions",
    description = "Every prediction of the caller joined with its match, latest kickoff first.",
    responses(
        (status = 200, description = "The caller's predictions", body = UserPredictionListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn list_my_predictions(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserPredictionListResponse>, AppError> {
    let data: Vec<UserPredictionResponse> = PredictionService::new(&state.db)
        .list_for_user(auth_user.user_id)
        .await?
        .into_iter()
        .map(|(p, game)| UserPredictionResponse {
            prediction: PredictionResponse::new(p, &game),
            football_match: game.into(),
        })
        .collect();

    Ok(Json(UserPredictionListResponse {
        count: data.len(),
        data,
    }))
}
