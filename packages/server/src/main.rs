use anyhow::Context;
use tracing::{Level, info, warn};

use server::config::AppConfig;
use server::database;
use server::feed::FixtureFeedClient;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = database::init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;
    info!("Database ready");

    let feed = match FixtureFeedClient::from_config(&config.feed) {
        Ok(client) => {
            info!(
                league = %config.feed.league_id,
                season = %config.feed.season,
                "Fixture feed enabled"
            );
            Some(client)
        }
        Err(e) => {
            warn!(error = %e, "Fixture feed disabled, matches will only change through the API");
            None
        }
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = server::build_router(AppState { db, config, feed });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
