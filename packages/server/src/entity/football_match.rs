use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A persisted fixture. Rows are insert-only.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "football_match")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    // Natural key: compared as literal strings.
    #[sea_orm(unique_key = "natural_key")]
    pub home_team: String,
    #[sea_orm(unique_key = "natural_key")]
    pub away_team: String,
    /// Kickoff as an RFC 3339 string.
    #[sea_orm(unique_key = "natural_key")]
    pub date: String,

    pub league: String,
    pub season: String,
    pub match_day: i32,
    /// "<home>:<away>", or "0:0" / "" while unplayed.
    pub result: String,

    #[sea_orm(has_many)]
    pub predictions: HasMany<super::prediction::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
