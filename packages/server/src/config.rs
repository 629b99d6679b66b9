use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Lifetime of issued bearer tokens. Default: 24.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

fn default_token_ttl_hours() -> i64 {
    24
}

/// Upstream fixture provider settings.
#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    /// Provider root URL, without the `/fixtures` path.
    #[serde(default = "default_feed_base_url")]
    pub base_url: String,
    /// Sent as the `x-apisports-key` header. The feed is disabled when unset.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_league_id")]
    pub league_id: String,
    #[serde(default = "default_season")]
    pub season: String,
    /// League label stored on every ingested match.
    #[serde(default = "default_league_name")]
    pub league_name: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Whether listing matches pulls the feed first.
    #[serde(default = "default_refresh_on_read")]
    pub refresh_on_read: bool,
}

fn default_feed_base_url() -> String {
    "https://v3.football.api-sports.io".into()
}
fn default_league_id() -> String {
    "39".into()
}
fn default_season() -> String {
    "2024".into()
}
fn default_league_name() -> String {
    "Premier League".into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_refresh_on_read() -> bool {
    true
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_feed_base_url(),
            api_key: None,
            league_id: default_league_id(),
            season: default_season(),
            league_name: default_league_name(),
            timeout_secs: default_timeout_secs(),
            refresh_on_read: default_refresh_on_read(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var("BALLKNOWLEDGE_CONFIG")
            .unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8081)?
            .set_default("server.cors.allow_origins", vec!["http://localhost:3000"])?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://ball_knowledge.db?mode=rwc")?
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., BALLKNOWLEDGE__FEED__API_KEY)
            .add_source(Environment::with_prefix("BALLKNOWLEDGE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
