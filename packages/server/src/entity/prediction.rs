use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prediction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique_key = "user_match")]
    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    #[sea_orm(unique_key = "user_match")]
    pub match_id: i32,
    #[sea_orm(belongs_to, from = "match_id", to = "id")]
    pub football_match: HasOne<super::football_match::Entity>,

    pub predicted_score_home: i32,
    pub predicted_score_away: i32,
    /// Cached score, recomputed on every create/update.
    #[sea_orm(default_value = 0)]
    pub points: i32,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
