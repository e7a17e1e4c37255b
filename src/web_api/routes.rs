//! API Routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};

use super::auth::{self, AuthUser};
use crate::customer::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::models::ApiResponse;
use crate::state::AppState;

/// Create API router
pub fn create_router(state: AppState) -> Router {
    let authed = Router::new()
        // Customers
        .route("/customers", get(list_customers))
        .route("/customers", post(register_customer))
        .route("/customers/:id", get(get_customer))
        .route("/customers/:id", put(update_customer))
        .route("/customers/:id", delete(delete_customer))
        // Devices
        .route("/devices", get(list_devices))
        .route("/devices/types", get(list_device_types))
        .route("/devices/serial/:serial", get(get_device_by_serial))
        .route("/devices/:id", get(get_device))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Router::new()
        .route("/healthz", get(super::health_check))
        .merge(authed)
        .with_state(state)
}

// ========================================
// Customer Handlers
// ========================================

async fn register_customer(
    State(state): State<AppState>,
    Extension(AuthUser(actor)): Extension<AuthUser>,
    Json(req): Json<CreateCustomerRequest>,
) -> impl IntoResponse {
    match state.customers.register_customer(req, &actor).await {
        Ok(customer) => {
            (StatusCode::CREATED, Json(ApiResponse::success(customer))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

async fn list_customers(State(state): State<AppState>) -> impl IntoResponse {
    match state.customers.list_customers().await {
        Ok(customers) => Json(ApiResponse::success(customers)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn get_customer(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.customers.get_customer_detail(&id).await {
        Ok(detail) => Json(ApiResponse::success(detail)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCustomerRequest>,
) -> impl IntoResponse {
    match state.customers.update_customer(&id, req).await {
        Ok(customer) => Json(ApiResponse::success(customer)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.customers.delete_customer(&id).await {
        Ok(()) => Json(serde_json::json!({"ok": true})).into_response(),
        Err(e) => e.into_response(),
    }
}

// ========================================
// Device Handlers
// ========================================

async fn list_devices(State(state): State<AppState>) -> impl IntoResponse {
    match state.devices.list_devices().await {
        Ok(devices) => Json(ApiResponse::success(devices)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn list_device_types(State(state): State<AppState>) -> impl IntoResponse {
    match state.devices.list_device_types().await {
        Ok(types) => Json(ApiResponse::success(types)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn get_device(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.devices.get_device(&id).await {
        Ok(device) => Json(ApiResponse::success(device)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn get_device_by_serial(
    State(state): State<AppState>,
    Path(serial): Path<String>,
) -> impl IntoResponse {
    match state.devices.get_device_by_serial(&serial).await {
        Ok(device) => Json(ApiResponse::success(device)).into_response(),
        Err(e) => e.into_response(),
    }
}
