//! Client for the upstream fixtures provider.

mod client;
mod error;
pub mod payload;

pub use client::{API_KEY_HEADER, FixtureFeedClient};
pub use error::FeedError;
pub use payload::parse_fixtures;
