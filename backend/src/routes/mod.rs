//! Route definitions for the User Portal API
//!
//! This module organizes all API routes, the static frontend tier and
//! the middleware stack. Unmatched `/api/*` paths answer with JSON;
//! unmatched frontend paths get the themed 404 page.

use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    set_status::SetStatus,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod health;
mod users;

#[cfg(test)]
mod auth_tests;

pub use auth::auth_routes;
pub use users::user_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let public_dir = state.config.server.public_dir.clone();

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
        .fallback_service(static_site(&public_dir))
        // Apply middleware layers
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            themed_server_error,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::auth_routes())
        .nest("/users", users::user_routes())
        .fallback(api_not_found)
}

/// JSON 404 for unmatched API paths
async fn api_not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Ruta no encontrada" })),
    )
}

/// Static frontend with the themed 404 page as its miss handler.
/// `not_found_service` serves the page with the 404 status itself.
fn static_site(public_dir: &str) -> ServeDir<SetStatus<ServeFile>> {
    ServeDir::new(public_dir)
        .not_found_service(ServeFile::new(format!("{public_dir}/404.html")))
}

/// Replace bare 500s from the static tier with the themed error page.
/// API responses pass through untouched; their errors are JSON.
async fn themed_server_error(
    State(state): State<AppState>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let is_api = req.uri().path().starts_with("/api");
    let response = next.run(req).await;

    if !is_api && response.status() == StatusCode::INTERNAL_SERVER_ERROR {
        let page = format!("{}/500.html", state.config.server.public_dir);
        if let Ok(body) = tokio::fs::read_to_string(&page).await {
            return (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response();
        }
    }

    response
}
