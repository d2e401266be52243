// school-backend/src/middleware/auth.rs

use crate::api::AppState;
use crate::domain::user_model::CurrentUser;
use crate::error::AppError;
use crate::utils::error_helper::unauthorized_error;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Authorizationヘッダーからベアラートークンを取り出す
///
/// ヘッダーが無い場合は匿名アクセスとして `Ok(None)` を返す。
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<Option<String>, AppError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| {
        unauthorized_error(
            "Authorization header is not valid UTF-8",
            "auth::extract_bearer_token",
        )
    })?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(Some(token.trim().to_string()))
        }
        _ => Err(unauthorized_error(
            "Authorization header must use the Bearer scheme",
            "auth::extract_bearer_token",
        )),
    }
}

/// JWT認証ミドルウェア
///
/// 検証に成功した場合は `CurrentUser` をリクエスト拡張に格納する。
/// トークンが無いリクエストは匿名のまま通す。
pub async fn jwt_auth_middleware(
    State(app_state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = extract_bearer_token(req.headers())? else {
        debug!(path = %req.uri().path(), "Anonymous request");
        return Ok(next.run(req).await);
    };

    let claims = app_state
        .jwt_manager
        .verify_access_token(&token)
        .map_err(|e| {
            warn!(error = %e, "Access token verification failed");
            AppError::Unauthorized("Invalid or expired access token".to_string())
        })?;

    let user = CurrentUser::from(claims.user);
    debug!(user_id = %user.user_id, role = ?user.role, "Authenticated request");
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
