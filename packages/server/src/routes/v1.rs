use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/matches", match_routes())
        .nest("/predictions", prediction_routes())
        .routes(routes!(handlers::prediction::list_my_predictions))
        .routes(routes!(handlers::leaderboard::get_leaderboard))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
        .routes(routes!(handlers::auth::refresh))
}

fn match_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::matches::list_matches,
            handlers::matches::create_matches
        ))
        .routes(routes!(handlers::matches::list_by_gameweek))
        .routes(routes!(handlers::matches::get_match_details))
        .routes(routes!(handlers::matches::sync_matches))
}

fn prediction_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::prediction::create_prediction))
        .routes(routes!(
            handlers::prediction::get_prediction,
            handlers::prediction::update_prediction
        ))
}
