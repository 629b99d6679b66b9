use std::time::Duration;

use sea_orm::sea_query::Index;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::entity::{football_match, prediction};

pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());

    // Set connection pool options
    opt.max_connections(20)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("server::entity::*")
        .sync(&db)
        .await?;
    ensure_indexes(&db).await?;

    Ok(db)
}

/// Ensure the natural-key unique indexes exist.
///
/// These are the storage-level guard against concurrent duplicate inserts; the
/// existence checks done before inserting only produce nicer errors.
pub async fn ensure_indexes<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let match_key = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_football_match_natural_key")
        .table(football_match::Entity)
        .col(football_match::Column::HomeTeam)
        .col(football_match::Column::AwayTeam)
        .col(football_match::Column::Date)
        .to_owned();
    db.execute(&match_key).await?;

    let prediction_key = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_prediction_user_match")
        .table(prediction::Entity)
        .col(prediction::Column::UserId)
        .col(prediction::Column::MatchId)
        .to_owned();
    db.execute(&prediction_key).await?;

    info!("Ensured natural-key indexes exist");
    Ok(())
}
