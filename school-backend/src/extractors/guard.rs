use crate::api::AppState;
use crate::domain::user_model::CurrentUser;
use crate::service::guard_service::Guard;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use std::sync::Arc;

/// リクエストの現在のユーザーからガードを生成する Extractor
///
/// 認証ミドルウェアが `CurrentUser` を格納していない場合は最小権限になる。
impl FromRequestParts<Arc<AppState>> for Guard {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<CurrentUser>();
        Ok(state.guard_service.guard_for(user))
    }
}
