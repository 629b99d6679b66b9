use chrono::Utc;
use common::FixtureRecord;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set, SqlErr,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::FeedConfig;
use crate::entity::football_match;
use crate::feed::{FeedError, FixtureFeedClient};

/// Counts from one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct IngestReport {
    /// Records stored as new matches.
    #[schema(example = 10)]
    pub inserted: u32,
    /// Records whose natural key was already stored.
    #[schema(example = 370)]
    pub skipped: u32,
    /// Records that could not be stored.
    #[schema(example = 0)]
    pub failed: u32,
}

enum Stored {
    Inserted,
    Duplicate,
}

/// Writes [`FixtureRecord`]s into `football_match`, deduplicating on
/// (home team, away team, kickoff).
pub struct FixtureIngestor<'a, C: ConnectionTrait> {
    conn: &'a C,
    league: &'a str,
    season: &'a str,
}

impl<'a, C: ConnectionTrait> FixtureIngestor<'a, C> {
    pub fn new(conn: &'a C, league: &'a str, season: &'a str) -> Self {
        Self {
            conn,
            league,
            season,
        }
    }

    /// Store every record not already present.
    ///
    /// Never fails as a whole: a record that cannot be stored is logged and
    /// counted in [`IngestReport::failed`], and the pass moves on.
    pub async fn ingest(&self, records: &[FixtureRecord]) -> IngestReport {
        let mut report = IngestReport::default();

        for record in records {
            match self.store(record).await {
                Ok(Stored::Inserted) => report.inserted += 1,
                Ok(Stored::Duplicate) => report.skipped += 1,
                Err(e) => {
                    error!(
                        home = %record.home_team,
                        away = %record.away_team,
                        kickoff = %record.kickoff_key(),
                        error = %e,
                        "Failed to store match"
                    );
                    report.failed += 1;
                }
            }
        }

        info!(
            inserted = report.inserted,
            skipped = report.skipped,
            failed = report.failed,
            "Fixture ingestion finished"
        );
        report
    }

    async fn store(&self, record: &FixtureRecord) -> Result<Stored, DbErr> {
        let date = record.kickoff_key();
        if find_by_natural_key(self.conn, &record.home_team, &record.away_team, &date)
            .await?
            .is_some()
        {
            return Ok(Stored::Duplicate);
        }
        self.insert_record(record).await
    }

    /// Insert without looking up first. A natural-key collision reports `Duplicate`.
    async fn insert_record(&self, record: &FixtureRecord) -> Result<Stored, DbErr> {
        let model = football_match::ActiveModel {
            home_team: Set(record.home_team.clone()),
            away_team: Set(record.away_team.clone()),
            date: Set(record.kickoff_key()),
            league: Set(self.league.to_string()),
            season: Set(self.season.to_string()),
            match_day: Set(record.matchday()),
            result: Set(record.result()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match model.insert(self.conn).await {
            Ok(_) => Ok(Stored::Inserted),
            // Lost a race with a concurrent pass.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!(home = %record.home_team, away = %record.away_team, "Match inserted concurrently");
                Ok(Stored::Duplicate)
            }
            Err(e) => Err(e),
        }
    }
}

/// Look up a match by its natural key. Strings are compared literally.
pub async fn find_by_natural_key<C: ConnectionTrait>(
    conn: &C,
    home_team: &str,
    away_team: &str,
    date: &str,
) -> Result<Option<football_match::Model>, DbErr> {
    football_match::Entity::find()
        .filter(football_match::Column::HomeTeam.eq(home_team))
        .filter(football_match::Column::AwayTeam.eq(away_team))
        .filter(football_match::Column::Date.eq(date))
        .one(conn)
        .await
}

/// Fetch the configured league and season from the feed and store the result.
pub async fn sync_from_feed<C: ConnectionTrait>(
    conn: &C,
    feed: &FixtureFeedClient,
    config: &FeedConfig,
) -> Result<IngestReport, FeedError> {
    let records = feed.fetch_fixtures().await?;
    let ingestor = FixtureIngestor::new(conn, &config.league_name, &config.season);
    Ok(ingestor.ingest(&records).await)
}

/// Best-effort refresh ahead of a read. Feed problems are logged, never returned.
pub async fn refresh_from_feed<C: ConnectionTrait>(
    conn: &C,
    feed: Option<&FixtureFeedClient>,
    config: &FeedConfig,
) -> Option<IngestReport> {
    let Some(feed) = feed else {
        debug!("Fixture feed disabled, serving stored matches");
        return None;
    };

    match sync_from_feed(conn, feed, config).await {
        Ok(report) => Some(report),
        Err(e) => {
            warn!(error = %e, "Fixture feed unavailable, serving stored matches");
            None
        }
    }
}
