// school-backend/src/api/mod.rs
use crate::config::AppConfig;
use crate::domain::role_table::RoleTable;
use crate::error::AppResult;
use crate::logging::{inject_request_context, logging_middleware};
use crate::middleware::auth::jwt_auth_middleware;
use crate::service::guard_service::GuardService;
use crate::utils::error_helper::internal_server_error;
use crate::utils::jwt::JwtManager;
use crate::utils::permission::PermissionChecker;
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub guard_service: GuardService,
    pub jwt_manager: Arc<JwtManager>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, role_table: RoleTable) -> AppResult<Self> {
        let jwt_manager = JwtManager::new(config.jwt_config()).map_err(|e| {
            internal_server_error(e, "api::AppState::new", "Invalid JWT configuration")
        })?;
        let checker = PermissionChecker::new(Arc::new(role_table));

        Ok(Self {
            guard_service: GuardService::new(checker),
            jwt_manager: Arc::new(jwt_manager),
            config: Arc::new(config),
        })
    }
}

/// 全ルーターを統合したアプリケーションルーター
pub fn app_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .merge(handlers::permission_handler::permission_router_with_state(
            app_state.clone(),
        ))
        .merge(handlers::system_handler::system_router_with_state(
            app_state.clone(),
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn_with_state(
            app_state,
            jwt_auth_middleware,
        ))
        .layer(middleware::from_fn(inject_request_context))
        .layer(TraceLayer::new_for_http())
}
