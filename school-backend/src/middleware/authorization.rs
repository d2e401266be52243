// school-backend/src/middleware/authorization.rs

use crate::domain::permission::Permission;
use crate::domain::role_model::Role;
use crate::domain::user_model::CurrentUser;
use crate::error::AppError;
use crate::log_with_context;
use crate::service::guard_service::GuardService;
use crate::utils::error_helper::{forbidden_error, unauthorized_error};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// ルートに要求するロールと権限
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequirePermission {
    pub required_role: Role,
    pub permission: Option<Permission>,
}

impl RequirePermission {
    pub fn new(required_role: Role, permission: Option<Permission>) -> Self {
        Self {
            required_role,
            permission,
        }
    }

    /// 権限のみを要求する（ロール階層は最小権限で満たされる）
    pub fn permission(permission: Permission) -> Self {
        Self::new(Role::least_privileged(), Some(permission))
    }

    /// ロール階層のみを要求する
    pub fn role(required_role: Role) -> Self {
        Self::new(required_role, None)
    }
}

impl std::fmt::Display for RequirePermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.permission {
            Some(permission) => write!(f, "role>={} with {}", self.required_role, permission),
            None => write!(f, "role>={}", self.required_role),
        }
    }
}

/// ミドルウェアに渡す状態
#[derive(Clone, Debug)]
pub struct PermissionGate {
    pub guard_service: GuardService,
    pub requirement: RequirePermission,
}

impl PermissionGate {
    pub fn new(guard_service: GuardService, requirement: RequirePermission) -> Self {
        Self {
            guard_service,
            requirement,
        }
    }
}

/// 通過したリクエストに付与する権限情報
#[derive(Clone, Debug)]
pub struct PermissionContext {
    pub user_id: Option<Uuid>,
    pub role: Role,
    pub requirement: RequirePermission,
}

/// 権限チェックミドルウェアマクロ
#[macro_export]
macro_rules! require_permission {
    ($guard_service:expr, $role:expr, $permission:expr) => {{
        use axum::middleware::from_fn_with_state;
        use $crate::middleware::authorization::{
            check_permission_with_state, PermissionGate, RequirePermission,
        };

        let gate = PermissionGate::new(
            $guard_service.clone(),
            RequirePermission::new($role, Some($permission)),
        );
        from_fn_with_state(gate, check_permission_with_state)
    }};
}

/// ロール階層チェックミドルウェアマクロ
#[macro_export]
macro_rules! require_role {
    ($guard_service:expr, $role:expr) => {{
        use axum::middleware::from_fn_with_state;
        use $crate::middleware::authorization::{
            check_permission_with_state, PermissionGate, RequirePermission,
        };

        let gate = PermissionGate::new($guard_service.clone(), RequirePermission::role($role));
        from_fn_with_state(gate, check_permission_with_state)
    }};
}

/// 状態を持つ権限チェックミドルウェア関数
pub async fn check_permission_with_state(
    State(gate): State<PermissionGate>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    check_permission(&gate, req, next).await
}

/// 権限チェックミドルウェア関数
///
/// UIと同じ判定をサーバー側でも行う。匿名ユーザーは最小権限ロールとして判定し、
/// 拒否された場合のみ 401 を返す。
pub async fn check_permission(
    gate: &PermissionGate,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = req.extensions().get::<CurrentUser>().cloned();
    let guard = gate.guard_service.guard_for(user.as_ref());
    let requirement = gate.requirement;

    if !guard.can_access(requirement.required_role, requirement.permission) {
        log_with_context!(
            tracing::Level::WARN,
            "Permission denied",
            "user_id" => user.as_ref().map(|u| u.user_id),
            "role" => guard.role(),
            "required_role" => requirement.required_role,
            "permission" => requirement.permission,
        );

        return Err(match &user {
            None => unauthorized_error(
                "Authentication required",
                "authorization::check_permission",
            ),
            Some(user) => forbidden_error(
                "You don't have permission to perform this action",
                &format!("authorization::check_permission::{}", requirement),
                Some(&user.user_id.to_string()),
            ),
        });
    }

    req.extensions_mut().insert(PermissionContext {
        user_id: user.map(|u| u.user_id),
        role: guard.role(),
        requirement,
    });

    Ok(next.run(req).await)
}
