pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze-mentions", get(routes::analyze_mentions))
        .route("/analyze-mentions-mock", get(routes::analyze_mentions_mock))
        .route("/generate-reply", post(routes::generate_reply))
        .route("/create-lead", post(routes::create_lead))
        .route("/schedule-post", post(routes::schedule_post))
        .route("/leads", get(routes::list_leads))
        .route("/personas", get(routes::list_personas))
        .route("/personas/{platform}", get(routes::get_persona))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
