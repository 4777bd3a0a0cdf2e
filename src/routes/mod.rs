//! Rutas de la API
//!
//! Cada recurso arma su propio router; `create_app` los compone bajo
//! `/api/v1` con CORS, tracing y un fallback JSON de 404.

pub mod auth_routes;
pub mod booking_routes;
pub mod user_routes;
pub mod vehicle_routes;

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .nest("/api/v1/auth", auth_routes::create_auth_router())
        .nest("/api/v1/users", user_routes::create_user_router())
        .nest("/api/v1/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/v1/bookings", booking_routes::create_booking_router())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(state)
}

/// Endpoint de salud
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Vehicle rental booking API",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Fallback JSON para rutas desconocidas
async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Route not found",
            "path": uri.path(),
        })),
    )
}
