pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

/// Build the axum Router: the notify endpoint, the SSE subscriber stream,
/// and permissive CORS so any web origin can subscribe.
pub fn build_router(app_state: state::NotifyState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/notify", post(routes::notify))
        .route("/api/events", get(routes::sse_events))
        .layer(cors)
        .with_state(app_state)
}
