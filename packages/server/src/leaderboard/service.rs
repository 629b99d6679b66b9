use std::collections::HashMap;

use common::{LeaderboardEntry, UserTotals, leaderboard::rank_standings};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
};

use crate::entity::{prediction, user};

pub struct LeaderboardService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> LeaderboardService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Ranked standings of every user with at least one prediction.
    pub async fn standings(&self) -> Result<Vec<LeaderboardEntry>, DbErr> {
        let sums: Vec<(i32, i64, i64)> = prediction::Entity::find()
            .select_only()
            .column(prediction::Column::UserId)
            .column_as(prediction::Column::Points.sum(), "total_points")
            .column_as(prediction::Column::Id.count(), "prediction_count")
            .group_by(prediction::Column::UserId)
            .into_tuple()
            .all(self.conn)
            .await?;
        if sums.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<i32> = sums.iter().map(|(id, _, _)| *id).collect();
        let usernames: HashMap<i32, String> = user::Entity::find()
            .select_only()
            .column(user::Column::Id)
            .column(user::Column::Username)
            .filter(user::Column::Id.is_in(user_ids))
            .into_tuple::<(i32, String)>()
            .all(self.conn)
            .await?
            .into_iter()
            .collect();

        let totals = sums
            .into_iter()
            .filter_map(|(user_id, total_points, prediction_count)| {
                let username = usernames.get(&user_id)?.clone();
                Some(UserTotals {
                    user_id,
                    username,
                    total_points,
                    prediction_count,
                })
            })
            .collect();

        Ok(rank_standings(totals))
    }

    /// Sum of a single user's points; zero when they have no predictions.
    pub async fn total_points(&self, user_id: i32) -> Result<i64, DbErr> {
        let total: Option<Option<i64>> = prediction::Entity::find()
            .select_only()
            .column_as(prediction::Column::Points.sum(), "total_points")
            .filter(prediction::Column::UserId.eq(user_id))
            .into_tuple()
            .one(self.conn)
            .await?;
        Ok(total.flatten().unwrap_or(0))
    }
}
