pub mod football_match;
pub mod prediction;
pub mod user;
