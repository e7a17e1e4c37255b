//! WebAPI - REST API Endpoints
//!
//! ## Responsibilities
//!
//! - HTTP API routes
//! - Bearer-token authentication
//! - Response formatting

pub mod auth;
mod routes;

pub use auth::AuthUser;
pub use routes::create_router;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::models::HealthResponse;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_connected = sqlx::query("SELECT 1").fetch_one(&state.pool).await.is_ok();

    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        db_connected,
    };

    Json(response)
}
