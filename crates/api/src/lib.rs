//! HTTP surface of the visa site: resolved content for visitors, the active
//! notification banner, and editor-only write and import routes.

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Router with every route group and the shared middleware stack.
pub fn build_app(state: AppState) -> Router {
    let cors = middleware::cors::cors_layer(&state.config().cors_origins);
    routes::build_router(state)
        .layer(middleware::body_limit::body_limit_layer())
        .layer(middleware::request_tracing::trace_layer())
        .layer(cors)
}
