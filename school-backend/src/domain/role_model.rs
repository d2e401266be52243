// school-backend/src/domain/role_model.rs
use serde::{Deserialize, Serialize};
use tracing::warn;

/// ロール名を表すenum
///
/// 閉じた集合であり、プロセスの起動後に増減することはない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    /// District Education Officer
    Deo,
    /// Sub-District Education Officer
    Sdeo,
    /// Head of Institution
    Hoi,
    Teacher,
}

impl Role {
    /// 全ロール（権限レベルの高い順）
    pub const ALL: [Role; 6] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Deo,
        Role::Sdeo,
        Role::Hoi,
        Role::Teacher,
    ];

    /// ロール名を文字列として取得
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Deo => "deo",
            Role::Sdeo => "sdeo",
            Role::Hoi => "hoi",
            Role::Teacher => "teacher",
        }
    }

    /// 文字列からロール名を解析（大文字・小文字は区別しない）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "super_admin" => Some(Role::SuperAdmin),
            "admin" => Some(Role::Admin),
            "deo" => Some(Role::Deo),
            "sdeo" => Some(Role::Sdeo),
            "hoi" => Some(Role::Hoi),
            "teacher" => Some(Role::Teacher),
            _ => None,
        }
    }

    /// 権限レベルを数値で取得（高いほど強い権限）
    pub fn rank(&self) -> u8 {
        match self {
            Role::SuperAdmin => 100,
            Role::Admin => 80,
            Role::Deo => 60,
            Role::Sdeo => 50,
            Role::Hoi => 40,
            Role::Teacher => 10,
        }
    }

    /// 最小権限ロール
    pub fn least_privileged() -> Self {
        Role::Teacher
    }

    /// 指定されたロール以上の権限レベルかチェック
    pub fn outranks_or_equals(&self, target: Role) -> bool {
        self.rank() >= target.rank()
    }

    /// セッション由来のロール名を解決する
    ///
    /// 未設定・未知のロールは最小権限に落とす。
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            Some(raw) => Self::parse(raw).unwrap_or_else(|| {
                warn!(role = %raw, "Unknown role name, falling back to least privilege");
                Self::least_privileged()
            }),
            None => Self::least_privileged(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid role name: {}", s))
    }
}
