pub mod auth;
pub mod health;
pub mod leaderboard;
pub mod matches;
pub mod prediction;
