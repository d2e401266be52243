// school-backend/src/service/guard_service.rs

use crate::domain::permission::Permission;
use crate::domain::role_model::Role;
use crate::domain::user_model::CurrentUser;
use crate::utils::permission::PermissionChecker;
use serde::Serialize;

/// ロールから導出した名前付き判定結果
///
/// UIの表示制御とサーバー側のゲートは同じ定義を参照する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardView {
    pub role: Role,
    pub rank: u8,
    pub is_super_admin: bool,
    pub is_admin: bool,
    pub can_view_users: bool,
    pub can_manage_users: bool,
    pub can_manage_schools: bool,
    pub can_delete_schools: bool,
    pub can_manage_teachers: bool,
    pub can_manage_medical_records: bool,
    pub can_manage_master_data: bool,
    pub can_view_reports: bool,
    pub can_export_reports: bool,
    pub can_view_district_dashboard: bool,
    pub permissions: Vec<&'static str>,
}

impl GuardView {
    pub fn from_role(checker: &PermissionChecker, role: Role) -> Self {
        let has = |permission| checker.has_permission(role, permission);
        let has_any = |permissions: &[Permission]| permissions.iter().any(|p| has(*p));

        Self {
            role,
            rank: role.rank(),
            is_super_admin: PermissionChecker::has_role(role, Role::SuperAdmin),
            is_admin: PermissionChecker::has_role(role, Role::Admin),
            can_view_users: has(Permission::UsersRead),
            can_manage_users: has(Permission::UsersManageRoles),
            can_manage_schools: has_any(&[
                Permission::SchoolsCreate,
                Permission::SchoolsUpdate,
                Permission::SchoolsDelete,
            ]),
            can_delete_schools: has(Permission::SchoolsDelete),
            can_manage_teachers: has_any(&[
                Permission::TeachersCreate,
                Permission::TeachersUpdate,
                Permission::TeachersDelete,
            ]),
            can_manage_medical_records: has_any(&[
                Permission::MedicalRecordsCreate,
                Permission::MedicalRecordsUpdate,
                Permission::MedicalRecordsDelete,
            ]),
            can_manage_master_data: has(Permission::MasterDataManage),
            can_view_reports: has(Permission::ReportsView),
            can_export_reports: checker.can_access(role, Role::Deo, Some(Permission::ReportsExport)),
            can_view_district_dashboard: checker.can_access(
                role,
                Role::Sdeo,
                Some(Permission::ReportsView),
            ),
            permissions: checker.table().tokens(role),
        }
    }
}

/// リクエスト単位の判定ファサード
///
/// リクエストごとに生成し、リクエストをまたいで保持しない。
#[derive(Debug, Clone)]
pub struct Guard {
    checker: PermissionChecker,
    view: GuardView,
}

impl Guard {
    pub fn role(&self) -> Role {
        self.view.role
    }

    pub fn view(&self) -> &GuardView {
        &self.view
    }

    pub fn into_view(self) -> GuardView {
        self.view
    }

    pub fn has_role(&self, target: Role) -> bool {
        PermissionChecker::has_role(self.role(), target)
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.checker.has_permission(self.role(), permission)
    }

    pub fn has_permission_token(&self, token: &str) -> bool {
        self.checker.has_permission_token(self.role(), token)
    }

    pub fn can_access(&self, required: Role, permission: Option<Permission>) -> bool {
        self.checker.can_access(self.role(), required, permission)
    }

    pub fn can_access_token(&self, required: Role, token: Option<&str>) -> bool {
        self.checker.can_access_token(self.role(), required, token)
    }
}

/// ガード生成サービス
#[derive(Debug, Clone)]
pub struct GuardService {
    checker: PermissionChecker,
}

impl GuardService {
    pub fn new(checker: PermissionChecker) -> Self {
        Self { checker }
    }

    pub fn checker(&self) -> &PermissionChecker {
        &self.checker
    }

    /// 現在のユーザーからガードを生成
    ///
    /// 未認証・ロール未設定の場合は最小権限ロールとして扱う。
    pub fn guard_for(&self, user: Option<&CurrentUser>) -> Guard {
        let role = user
            .map(CurrentUser::effective_role)
            .unwrap_or_else(Role::least_privileged);
        self.guard_for_role(role)
    }

    pub fn guard_for_role(&self, role: Role) -> Guard {
        Guard {
            view: GuardView::from_role(&self.checker, role),
            checker: self.checker.clone(),
        }
    }
}
