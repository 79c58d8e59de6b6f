use axum::{
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{api as auth_api, auth_middleware, AuthState};
use crate::middleware::request_logging;

/// Create the API router
pub fn create_router(state: AuthState) -> Router {
    let jwt_handler = state.credentials.jwt_handler();

    // Signup/signin (separate router with auth state)
    let auth_routes = Router::new()
        .route("/auth/signup", post(auth_api::signup))
        .route("/auth/signin", post(auth_api::signin))
        .with_state(state);

    // Bearer-protected routes
    let protected_routes = Router::new()
        .route("/users/me", get(auth_api::get_current_user))
        .route_layer(middleware::from_fn_with_state(jwt_handler, auth_middleware));

    let public_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(auth_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ===== Route Handlers =====

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ===== Response Types =====

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
