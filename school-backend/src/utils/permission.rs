// school-backend/src/utils/permission.rs

use crate::domain::permission::Permission;
use crate::domain::role_model::Role;
use crate::domain::role_table::RoleTable;
use std::sync::Arc;
use tracing::debug;

/// 統合された権限チェック機能
///
/// ロール表は起動後に変更されないため、複数リクエストから同期なしで共有できる。
#[derive(Debug, Clone)]
pub struct PermissionChecker {
    table: Arc<RoleTable>,
}

impl PermissionChecker {
    pub fn new(table: Arc<RoleTable>) -> Self {
        Self { table }
    }

    /// 組み込みのロール表を使うチェッカー
    pub fn standard() -> Self {
        Self::new(Arc::new(RoleTable::standard()))
    }

    pub fn table(&self) -> &RoleTable {
        &self.table
    }

    /// `role` が `target` 以上の権限レベルかチェック（同レベルは満たす）
    pub fn has_role(role: Role, target: Role) -> bool {
        role.outranks_or_equals(target)
    }

    /// ロールが指定された権限を持つかチェック
    pub fn has_permission(&self, role: Role, permission: Permission) -> bool {
        self.table.contains(role, permission)
    }

    /// トークン文字列で権限をチェック
    ///
    /// 未知・不正なトークンはエラーにせず false を返す。
    pub fn has_permission_token(&self, role: Role, token: &str) -> bool {
        match Permission::from_token(token) {
            Some(permission) => self.has_permission(role, permission),
            None => {
                debug!(role = %role, token = %token, "Unknown permission token, denying");
                false
            }
        }
    }

    /// ロール階層と（指定があれば）権限の両方を満たすかチェック
    pub fn can_access(&self, role: Role, required: Role, permission: Option<Permission>) -> bool {
        Self::can_access_with(role, required, permission, |r, p| self.has_permission(r, p))
    }

    /// トークン文字列版の `can_access`
    pub fn can_access_token(&self, role: Role, required: Role, token: Option<&str>) -> bool {
        if !Self::has_role(role, required) {
            return false;
        }
        match token {
            Some(token) => self.has_permission_token(role, token),
            None => true,
        }
    }

    /// 権限判定を差し替え可能な `can_access`
    ///
    /// ロール階層を満たさない場合 `check` は呼ばれない。
    pub fn can_access_with<F>(
        role: Role,
        required: Role,
        permission: Option<Permission>,
        check: F,
    ) -> bool
    where
        F: FnOnce(Role, Permission) -> bool,
    {
        if !Self::has_role(role, required) {
            return false;
        }
        match permission {
            Some(permission) => check(role, permission),
            None => true,
        }
    }
}

impl Default for PermissionChecker {
    fn default() -> Self {
        Self::standard()
    }
}
