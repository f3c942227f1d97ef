use crate::{health, timing};

use relay_ws::AppState;

use axum::{Router, middleware, routing::get};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // WebSocket endpoint
        .route("/ws", get(relay_ws::handler))
        .route("/health", get(health::health))
        .with_state(state)
        .layer(middleware::from_fn(timing::log_request_timing))
        // CORS middleware (allow all origins)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
