// school-backend/src/api/dto/permission_dto.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::role_model::Role;
use crate::domain::role_table::RoleTable;

// --- Request DTOs ---

/// アクセス可否チェックリクエスト
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CheckAccessRequest {
    /// 要求ロール（省略時は最小権限ロール）
    #[validate(length(
        min = 1,
        max = 50,
        message = "Required role must be between 1 and 50 characters"
    ))]
    pub required_role: Option<String>,

    /// `<resource>.<action>` 形式の権限トークン
    #[validate(length(
        min = 1,
        max = 100,
        message = "Permission must be between 1 and 100 characters"
    ))]
    pub permission: Option<String>,
}

// --- Response DTOs ---

/// アクセス可否チェックレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckAccessResponse {
    pub allowed: bool,
    pub role: Role,
    pub required_role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    /// 権限トークンが既知の集合に含まれるか
    pub known_permission: bool,
}

/// ロール表の1エントリ
#[derive(Debug, Serialize, Deserialize)]
pub struct RoleSummary {
    pub role: Role,
    pub rank: u8,
    pub permissions: Vec<String>,
}

impl RoleSummary {
    pub fn from_table(table: &RoleTable, role: Role) -> Self {
        Self {
            role,
            rank: role.rank(),
            permissions: table.tokens(role).into_iter().map(str::to_string).collect(),
        }
    }
}

/// ロール一覧レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct RoleListResponse {
    pub roles: Vec<RoleSummary>,
    pub least_privileged: Role,
}

impl RoleListResponse {
    pub fn from_table(table: &RoleTable) -> Self {
        Self {
            roles: Role::ALL
                .into_iter()
                .map(|role| RoleSummary::from_table(table, role))
                .collect(),
            least_privileged: Role::least_privileged(),
        }
    }
}
