use crate::handlers;
use crate::middleware;
use crate::AppState;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Registration and sessions (public; GET /sessions does its own
        // token check and answers 401 for missing and invalid alike)
        .route("/api/members", post(handlers::members::register))
        .route(
            "/api/sessions",
            post(handlers::sessions::login).get(handlers::sessions::verify),
        )
        // Organization search is public; creation requires a session
        .route("/api/organizations", get(handlers::organizations::search))
        .route(
            "/api/organizations",
            post(handlers::organizations::create)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        // Membership directory
        .route(
            "/api/member-organization",
            get(handlers::member_organization::overview)
                .post(handlers::member_organization::request_join)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        .route(
            "/api/member-organization/:org_id/members/:member_id",
            patch(handlers::member_organization::decide)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        // Animal registry
        .route(
            "/api/animals",
            get(handlers::animals::list)
                .post(handlers::animals::create)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        .route(
            "/api/animals/:id",
            patch(handlers::animals::update)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        .with_state(state)
}
