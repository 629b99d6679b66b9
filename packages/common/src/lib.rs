pub mod fixture;
pub mod leaderboard;
pub mod match_result;
pub mod scoring;

pub use fixture::{FixtureRecord, RecordParseError};
pub use leaderboard::{LeaderboardEntry, UserTotals};
pub use match_result::{ParsedResult, Scoreline, UNPLAYED_SENTINEL};
pub use scoring::{Outcome, ScoreBreakdown};
