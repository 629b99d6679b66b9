use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::feed::FixtureFeedClient;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    /// `None` when no provider API key is configured.
    pub feed: Option<FixtureFeedClient>,
}
