use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::permission::Permission;
use crate::domain::role_model::Role;
use crate::require_role;
use crate::{api::AppState, error::AppError, types::ApiResponse};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemInfoResponse {
    pub environment: String,
    pub is_test: bool,
    pub is_production: bool,
    pub is_development: bool,
    pub role_count: usize,
    pub permission_count: usize,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn get_system_info(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SystemInfoResponse>>, AppError> {
    let config = &app_state.config;

    Ok(Json(ApiResponse::success(SystemInfoResponse {
        environment: config.environment.clone(),
        is_test: config.is_test(),
        is_production: config.is_production(),
        is_development: config.is_development(),
        role_count: Role::ALL.len(),
        permission_count: Permission::ALL.len(),
    })))
}

pub fn system_router_with_state(app_state: Arc<AppState>) -> Router {
    let admin_only = Router::new()
        .route("/admin/system/info", get(get_system_info))
        .route_layer(require_role!(app_state.guard_service, Role::Admin));

    Router::new()
        .route("/health", get(health_check))
        .merge(admin_only)
        .with_state(app_state)
}
