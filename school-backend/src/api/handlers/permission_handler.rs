// school-backend/src/api/handlers/permission_handler.rs

use crate::api::dto::permission_dto::*;
use crate::api::dto::ApiResponse;
use crate::api::AppState;
use crate::domain::permission::Permission;
use crate::domain::role_model::Role;
use crate::error::{AppError, AppResult};
use crate::service::guard_service::{Guard, GuardView};
use crate::utils::error_helper::convert_validation_errors;
use axum::{
    extract::{Json, State},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// ロール表を取得
pub async fn list_roles_handler(
    State(app_state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<RoleListResponse>>> {
    let table = app_state.guard_service.checker().table();
    Ok(Json(ApiResponse::success(RoleListResponse::from_table(
        table,
    ))))
}

/// 現在のユーザーのガードを取得
pub async fn get_my_guards_handler(guard: Guard) -> AppResult<Json<ApiResponse<GuardView>>> {
    Ok(Json(ApiResponse::success(guard.into_view())))
}

/// アクセス可否をチェック
///
/// 未知の権限トークンは拒否として答える。
pub async fn check_access_handler(
    guard: Guard,
    Json(payload): Json<CheckAccessRequest>,
) -> AppResult<Json<ApiResponse<CheckAccessResponse>>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "permission_handler::check_access"))?;

    let required_role = match payload.required_role.as_deref() {
        Some(name) => Role::parse(name).ok_or_else(|| {
            AppError::ValidationErrors(vec![format!("required_role: Unknown role '{}'", name)])
        })?,
        None => Role::least_privileged(),
    };

    let permission = payload.permission.as_deref();
    let allowed = guard.can_access_token(required_role, permission);

    info!(
        role = %guard.role(),
        required_role = %required_role,
        permission = ?permission,
        allowed,
        "Access check"
    );

    Ok(Json(ApiResponse::success(CheckAccessResponse {
        allowed,
        role: guard.role(),
        required_role,
        known_permission: permission.is_some_and(|t| Permission::from_token(t).is_some()),
        permission: payload.permission,
    })))
}

pub fn permission_router_with_state(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/roles", get(list_roles_handler))
        .route("/permissions/me", get(get_my_guards_handler))
        .route("/permissions/check", post(check_access_handler))
        .with_state(app_state)
}
