// school-backend/src/domain/permission.rs

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `<resource>.<action>` 形式のトークン
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]*\.[a-z][a-z0-9_]*$").expect("permission token pattern is valid")
});

/// 権限トークンの解析エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionTokenError {
    #[error("malformed permission token: {0:?}")]
    Malformed(String),

    #[error("unknown permission token: {0}")]
    Unknown(String),
}

/// 権限
///
/// 閉じた集合として定義し、トークン文字列との対応は `as_str` / `from_token` に集約する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Permission {
    UsersRead,
    UsersCreate,
    UsersUpdate,
    UsersDelete,
    UsersManageRoles,
    SchoolsRead,
    SchoolsCreate,
    SchoolsUpdate,
    SchoolsDelete,
    TeachersRead,
    TeachersCreate,
    TeachersUpdate,
    TeachersDelete,
    MedicalRecordsRead,
    MedicalRecordsCreate,
    MedicalRecordsUpdate,
    MedicalRecordsDelete,
    MasterDataRead,
    MasterDataManage,
    ReportsView,
    ReportsExport,
}

impl Permission {
    pub const ALL: [Permission; 21] = [
        Permission::UsersRead,
        Permission::UsersCreate,
        Permission::UsersUpdate,
        Permission::UsersDelete,
        Permission::UsersManageRoles,
        Permission::SchoolsRead,
        Permission::SchoolsCreate,
        Permission::SchoolsUpdate,
        Permission::SchoolsDelete,
        Permission::TeachersRead,
        Permission::TeachersCreate,
        Permission::TeachersUpdate,
        Permission::TeachersDelete,
        Permission::MedicalRecordsRead,
        Permission::MedicalRecordsCreate,
        Permission::MedicalRecordsUpdate,
        Permission::MedicalRecordsDelete,
        Permission::MasterDataRead,
        Permission::MasterDataManage,
        Permission::ReportsView,
        Permission::ReportsExport,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Permission::UsersRead => "users.read",
            Permission::UsersCreate => "users.create",
            Permission::UsersUpdate => "users.update",
            Permission::UsersDelete => "users.delete",
            Permission::UsersManageRoles => "users.manage_roles",
            Permission::SchoolsRead => "schools.read",
            Permission::SchoolsCreate => "schools.create",
            Permission::SchoolsUpdate => "schools.update",
            Permission::SchoolsDelete => "schools.delete",
            Permission::TeachersRead => "teachers.read",
            Permission::TeachersCreate => "teachers.create",
            Permission::TeachersUpdate => "teachers.update",
            Permission::TeachersDelete => "teachers.delete",
            Permission::MedicalRecordsRead => "medical_records.read",
            Permission::MedicalRecordsCreate => "medical_records.create",
            Permission::MedicalRecordsUpdate => "medical_records.update",
            Permission::MedicalRecordsDelete => "medical_records.delete",
            Permission::MasterDataRead => "master_data.read",
            Permission::MasterDataManage => "master_data.manage",
            Permission::ReportsView => "reports.view",
            Permission::ReportsExport => "reports.export",
        }
    }

    /// トークン文字列から権限を取得（未知のトークンは None）
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == token)
    }

    /// トークンが `<resource>.<action>` 形式かチェック
    pub fn is_well_formed(token: &str) -> bool {
        TOKEN_PATTERN.is_match(token)
    }

    /// リソース名 (e.g., "schools")
    pub fn resource(self) -> &'static str {
        self.split().0
    }

    /// アクション名 (e.g., "create")
    pub fn action(self) -> &'static str {
        self.split().1
    }

    fn split(self) -> (&'static str, &'static str) {
        let token = self.as_str();
        token.split_once('.').unwrap_or((token, ""))
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Permission {
    type Err = PermissionTokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if !Self::is_well_formed(token) {
            return Err(PermissionTokenError::Malformed(token.to_string()));
        }
        Self::from_token(token).ok_or_else(|| PermissionTokenError::Unknown(token.to_string()))
    }
}

impl TryFrom<String> for Permission {
    type Error = PermissionTokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Permission> for &'static str {
    fn from(permission: Permission) -> Self {
        permission.as_str()
    }
}
