//! Persisting feed fixtures as matches.

mod service;

pub use service::{FixtureIngestor, IngestReport, find_by_natural_key, refresh_from_feed, sync_from_feed};
