// school-backend/src/domain/role_table.rs

use crate::domain::permission::{Permission, PermissionTokenError};
use crate::domain::role_model::Role;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

static NO_PERMISSIONS: Lazy<HashSet<Permission>> = Lazy::new(HashSet::new);

/// ロール表の構成エラー（起動時に検出し、起動を中断する）
#[derive(Debug, Error)]
pub enum RoleTableError {
    #[error("role {role}: malformed permission token {token:?}")]
    MalformedToken { role: Role, token: String },

    #[error("role {role}: unknown permission token {token}")]
    UnknownToken { role: Role, token: String },

    #[error("unknown role in role table: {0}")]
    UnknownRole(String),

    #[error("role table has no entry for role {0}")]
    MissingRole(Role),

    #[error("invalid role table document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// ロール表ファイルの形式
#[derive(Debug, Deserialize)]
struct RoleTableDocument {
    roles: HashMap<String, Vec<String>>,
}

/// ロールごとの権限集合
///
/// 各ロールの集合は独立して定義する。上位ロールが下位ロールの権限を
/// すべて持つことは前提にしない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTable {
    entries: HashMap<Role, HashSet<Permission>>,
}

impl RoleTable {
    /// 組み込みのロール表
    pub fn standard() -> Self {
        use Permission::*;

        let entries = Role::ALL
            .into_iter()
            .map(|role| {
                let permissions: HashSet<Permission> = match role {
                    Role::SuperAdmin => Permission::ALL.into_iter().collect(),
                    Role::Admin => [
                        UsersRead,
                        UsersCreate,
                        UsersUpdate,
                        UsersManageRoles,
                        SchoolsRead,
                        SchoolsCreate,
                        SchoolsUpdate,
                        TeachersRead,
                        TeachersCreate,
                        TeachersUpdate,
                        TeachersDelete,
                        MedicalRecordsRead,
                        MasterDataRead,
                        MasterDataManage,
                        ReportsView,
                        ReportsExport,
                    ]
                    .into_iter()
                    .collect(),
                    Role::Deo => [
                        UsersRead,
                        SchoolsRead,
                        SchoolsUpdate,
                        TeachersRead,
                        TeachersCreate,
                        TeachersUpdate,
                        MedicalRecordsRead,
                        MasterDataRead,
                        ReportsView,
                        ReportsExport,
                    ]
                    .into_iter()
                    .collect(),
                    Role::Sdeo => [
                        SchoolsRead,
                        TeachersRead,
                        TeachersUpdate,
                        MasterDataRead,
                        ReportsView,
                    ]
                    .into_iter()
                    .collect(),
                    Role::Hoi => [
                        SchoolsRead,
                        TeachersRead,
                        TeachersUpdate,
                        MedicalRecordsRead,
                        MedicalRecordsCreate,
                        MedicalRecordsUpdate,
                        MasterDataRead,
                        ReportsView,
                    ]
                    .into_iter()
                    .collect(),
                    Role::Teacher => [
                        SchoolsRead,
                        TeachersRead,
                        MedicalRecordsRead,
                        MedicalRecordsCreate,
                        MasterDataRead,
                    ]
                    .into_iter()
                    .collect(),
                };
                (role, permissions)
            })
            .collect();

        Self { entries }
    }

    /// (ロール, トークン列) からロール表を構築
    ///
    /// 閉じた集合のすべてのロールにエントリが必要。
    pub fn from_entries<'a, I, T>(entries: I) -> Result<Self, RoleTableError>
    where
        I: IntoIterator<Item = (Role, T)>,
        T: IntoIterator<Item = &'a str>,
    {
        let mut table = HashMap::new();

        for (role, tokens) in entries {
            let mut permissions = HashSet::new();
            for token in tokens {
                let permission = token.parse::<Permission>().map_err(|e| match e {
                    PermissionTokenError::Malformed(token) => {
                        RoleTableError::MalformedToken { role, token }
                    }
                    PermissionTokenError::Unknown(token) => {
                        RoleTableError::UnknownToken { role, token }
                    }
                })?;
                permissions.insert(permission);
            }
            table.entry(role).or_insert_with(HashSet::new).extend(permissions);
        }

        if let Some(missing) = Role::ALL.into_iter().find(|r| !table.contains_key(r)) {
            return Err(RoleTableError::MissingRole(missing));
        }

        Ok(Self { entries: table })
    }

    /// JSONドキュメントからロール表を構築
    ///
    /// `{ "roles": { "<role>": ["<resource>.<action>", ...] } }`
    pub fn from_json(document: &str) -> Result<Self, RoleTableError> {
        let document: RoleTableDocument = serde_json::from_str(document)?;

        let mut entries = Vec::with_capacity(document.roles.len());
        for (name, tokens) in &document.roles {
            let role = Role::parse(name).ok_or_else(|| RoleTableError::UnknownRole(name.clone()))?;
            entries.push((role, tokens.iter().map(String::as_str)));
        }

        Self::from_entries(entries)
    }

    /// ロールの権限集合
    pub fn permissions(&self, role: Role) -> &HashSet<Permission> {
        // 構築時に全ロールの存在を保証している
        self.entries.get(&role).unwrap_or(&NO_PERMISSIONS)
    }

    /// ロールが指定された権限を持つかチェック
    pub fn contains(&self, role: Role, permission: Permission) -> bool {
        self.entries
            .get(&role)
            .is_some_and(|set| set.contains(&permission))
    }

    /// ロールの権限トークン一覧（ソート済み）
    pub fn tokens(&self, role: Role) -> Vec<&'static str> {
        let mut tokens: Vec<_> = self
            .permissions(role)
            .iter()
            .map(|p| p.as_str())
            .collect();
        tokens.sort_unstable();
        tokens
    }
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::standard()
    }
}
