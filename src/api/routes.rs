//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::api::middleware::{
    deserialize_user, logging_middleware, request_id_middleware, require_user,
};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs
/// first): request ID, then logging, then user deserialization, then CORS.
/// `require_user` is a route layer on the protected sub-routers only, so
/// anonymous requests to public routes never hit it.
///
/// # Routes
/// - `/health` - Health check
/// - `/api/users` - Registration (public)
/// - `/api/me` - Current user (protected)
/// - `/api/sessions` - Login (public); list/logout (protected)
/// - `/api/products` - Fetch (public); create/update/delete (protected)
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .merge(handlers::me::me_routes())
        .nest("/sessions", handlers::sessions::protected_session_routes())
        .nest("/products", handlers::products::protected_product_routes())
        .route_layer(middleware::from_fn(require_user));

    let api_routes = Router::new()
        .nest("/users", handlers::users::user_routes())
        .nest("/sessions", handlers::sessions::session_routes())
        .nest("/products", handlers::products::product_routes())
        .merge(protected_routes);

    Router::new()
        .merge(handlers::health::health_routes())
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            deserialize_user,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
