// school-backend/src/domain/user_model.rs

use crate::domain::role_model::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWTに含めるユーザー情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    pub user_id: Uuid,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>, // セッション層が付与したロール名
}

/// 認証済みの現在のユーザー
///
/// セッション層が所有する値で、権限判定側は読み取るだけ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub username: String,
    pub role: Option<Role>,
}

impl CurrentUser {
    pub fn new(user_id: Uuid, username: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
        }
    }

    /// 判定に使うロール（未設定なら最小権限）
    pub fn effective_role(&self) -> Role {
        self.role.unwrap_or_else(Role::least_privileged)
    }
}

impl From<UserClaims> for CurrentUser {
    fn from(claims: UserClaims) -> Self {
        // 未知のロール名は None ではなく最小権限として扱う
        let role = claims
            .role_name
            .as_deref()
            .map(|name| Role::resolve(Some(name)));
        Self {
            user_id: claims.user_id,
            username: claims.username,
            role,
        }
    }
}
