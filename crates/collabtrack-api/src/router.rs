//! Route definitions for the CollabTrack HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Leave some headroom over the configured file limit for the rest of
    // the multipart envelope.
    let max_body = state.config.storage.max_upload_size_bytes as usize + 1024 * 1024;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(project_routes())
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, me.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Project directory and version endpoints.
fn project_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects",
            post(handlers::project::create_project).get(handlers::project::list_projects),
        )
        .route("/projects/{id}", get(handlers::project::get_project))
        .route(
            "/projects/{id}/versions",
            post(handlers::version::upload_version).get(handlers::version::list_versions),
        )
        .route(
            "/projects/{id}/versions/{number}/download",
            get(handlers::version::download_version),
        )
}
