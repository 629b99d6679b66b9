use std::collections::HashMap;

use chrono::Utc;
use common::scoring;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set,
};
use tracing::debug;

use crate::entity::{football_match, prediction};
use crate::error::AppError;

const DUPLICATE_PREDICTION: &str = "Prediction already exists for this match";

/// Reject negative predicted scores.
fn validate_scores(home: i32, away: i32) -> Result<(), AppError> {
    if home < 0 || away < 0 {
        return Err(AppError::Validation(
            "Predicted scores must be non-negative".into(),
        ));
    }
    Ok(())
}

pub struct PredictionService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> PredictionService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Record a user's first prediction for a match, scored against its current result.
    pub async fn create(
        &self,
        user_id: i32,
        match_id: i32,
        home: i32,
        away: i32,
    ) -> Result<(prediction::Model, football_match::Model), AppError> {
        validate_scores(home, away)?;

        if self.find_for_match(user_id, match_id).await?.is_some() {
            return Err(AppError::Conflict(DUPLICATE_PREDICTION.into()));
        }
        let game = self.find_match(match_id).await?;

        let now = Utc::now();
        let model = prediction::ActiveModel {
            user_id: Set(user_id),
            match_id: Set(match_id),
            predicted_score_home: Set(home),
            predicted_score_away: Set(away),
            points: Set(scoring::score(home, away, &game.result)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let saved = model
            .insert(self.conn)
            .await
            .map_err(|e| AppError::from_insert(e, DUPLICATE_PREDICTION))?;
        debug!(prediction_id = saved.id, points = saved.points, "Prediction created");
        Ok((saved, game))
    }

    /// Replace the scores of a prediction owned by `user_id` and rescore it.
    ///
    /// Another user's prediction is reported as not found.
    pub async fn update(
        &self,
        user_id: i32,
        prediction_id: i32,
        home: i32,
        away: i32,
    ) -> Result<(prediction::Model, football_match::Model), AppError> {
        validate_scores(home, away)?;

        let existing = prediction::Entity::find_by_id(prediction_id)
            .filter(prediction::Column::UserId.eq(user_id))
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Prediction not found".into()))?;
        let game = self.find_match(existing.match_id).await?;

        let mut active: prediction::ActiveModel = existing.into();
        active.predicted_score_home = Set(home);
        active.predicted_score_away = Set(away);
        active.points = Set(scoring::score(home, away, &game.result));
        active.updated_at = Set(Utc::now());

        let saved = active.update(self.conn).await?;
        Ok((saved, game))
    }

    /// The user's prediction for one match, if any.
    pub async fn find_for_match(
        &self,
        user_id: i32,
        match_id: i32,
    ) -> Result<Option<prediction::Model>, DbErr> {
        prediction::Entity::find()
            .filter(prediction::Column::UserId.eq(user_id))
            .filter(prediction::Column::MatchId.eq(match_id))
            .one(self.conn)
            .await
    }

    /// All of a user's predictions with their matches, latest kickoff first.
    pub async fn list_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<(prediction::Model, football_match::Model)>, DbErr> {
        let predictions = prediction::Entity::find()
            .filter(prediction::Column::UserId.eq(user_id))
            .all(self.conn)
            .await?;
        if predictions.is_empty() {
            return Ok(Vec::new());
        }

        let match_ids: Vec<i32> = predictions.iter().map(|p| p.match_id).collect();
        let matches: HashMap<i32, football_match::Model> = football_match::Entity::find()
            .filter(football_match::Column::Id.is_in(match_ids))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let mut rows: Vec<_> = predictions
            .into_iter()
            .filter_map(|p| matches.get(&p.match_id).cloned().map(|m| (p, m)))
            .collect();

        rows.sort_by(|(pa, ma), (pb, mb)| mb.date.cmp(&ma.date).then_with(|| pb.id.cmp(&pa.id)));
        Ok(rows)
    }

    async fn find_match(&self, match_id: i32) -> Result<football_match::Model, AppError> {
        football_match::Entity::find_by_id(match_id)
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Match not found".into()))
    }
}
