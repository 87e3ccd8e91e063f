//! Application routing
//!
//! This module defines all HTTP routes for the application.

use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::api::{generate, health};
use crate::middleware::{log_request, REQUEST_ID_HEADER};
use crate::server::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness))
        .route("/liveness", get(health::liveness));

    Router::new()
        .route("/", get(generate::show_form).post(generate::generate_blog))
        .merge(health_routes)
        // ServiceBuilder applies top to bottom: logging wraps CORS
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(log_request))
                .layer(create_cors_layer()),
        )
        .with_state(state)
}

/// Create CORS layer with permissive settings
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([axum::http::HeaderName::from_static(REQUEST_ID_HEADER)])
}
