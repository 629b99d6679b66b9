//! Standings computed from stored prediction points.

mod service;

pub use service::LeaderboardService;
