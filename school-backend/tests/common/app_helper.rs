// tests/common/app_helper.rs

use axum::Router;
use school_backend::{
    api::{app_router, AppState},
    config::AppConfig,
    domain::{role_table::RoleTable, user_model::UserClaims},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::common;

/// 組み込みロール表でアプリをセットアップ
pub fn setup_app() -> (Router, Arc<AppState>) {
    setup_app_with_table(RoleTable::standard())
}

/// 任意のロール表でアプリをセットアップ
pub fn setup_app_with_table(table: RoleTable) -> (Router, Arc<AppState>) {
    common::init_test_env();

    let app_state = Arc::new(
        AppState::new(AppConfig::for_testing(), table).expect("test config should be valid"),
    );
    (app_router(app_state.clone()), app_state)
}

/// 指定したロール名のアクセストークンを発行
pub fn token_for_role(app_state: &AppState, role_name: Option<&str>) -> String {
    let claims = UserClaims {
        user_id: Uuid::new_v4(),
        username: format!("{}_user", role_name.unwrap_or("no_role")),
        role_name: role_name.map(str::to_string),
    };
    app_state
        .jwt_manager
        .generate_access_token(claims)
        .expect("token generation should succeed")
}
