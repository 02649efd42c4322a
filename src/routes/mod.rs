pub mod events_routes;
pub mod installation_routes;
pub mod maintenance_routes;
pub mod tire_routes;

use axum::{routing::get, Json, Router};

use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/tires", tire_routes::create_tire_router())
        .nest(
            "/api/vehicle-tires",
            installation_routes::create_installation_router(),
        )
        .nest(
            "/api/maintenance",
            maintenance_routes::create_maintenance_router(),
        )
        .nest("/api/events", events_routes::create_events_router())
}

/// Health check simple
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "fleet_maintenance",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
