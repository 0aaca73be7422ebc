pub mod discord;
pub mod error;
pub mod routes;
pub mod state;

use std::path::PathBuf;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Build the axum Router: the rank API, permissive CORS, and a static
/// asset fallback for everything else.
/// Used by `main` and available for integration testing.
pub fn build_router(app_state: state::AppState, static_dir: PathBuf) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/rank-colors", get(routes::ranks::get_rank_colors))
        .route("/api/assign-rank", post(routes::ranks::assign_rank))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .with_state(app_state)
}
