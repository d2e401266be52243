// src/config.rs
use crate::domain::role_table::RoleTable;
use crate::error::AppResult;
use crate::utils::error_helper::internal_server_error;
use crate::utils::jwt::JwtConfig;
use dotenvy::dotenv;
use std::env;
use std::fs;
use tracing::info;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub access_token_expiry_minutes: i64,
    /// ロール表の上書きファイル（JSON）
    pub role_table_path: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok(); // .env ファイルを読み込む (存在しなくてもエラーにしない)

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| "Invalid PORT value")?,
            jwt_secret: env::var("JWT_SECRET")
                .or_else(|_| env::var("JWT_SECRET_KEY"))
                .map_err(|_| "JWT_SECRET or JWT_SECRET_KEY must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "school-backend".to_string()),
            access_token_expiry_minutes: env::var("JWT_ACCESS_TOKEN_EXPIRY_MINUTES")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .map_err(|_| "Invalid JWT_ACCESS_TOKEN_EXPIRY_MINUTES value")?,
            role_table_path: env::var("ROLE_TABLE_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty()),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret_key: self.jwt_secret.clone(),
            access_token_expiry_minutes: self.access_token_expiry_minutes,
            issuer: self.jwt_issuer.clone(),
        }
    }

    /// ロール表を読み込む（上書きファイルがなければ組み込みの表）
    ///
    /// 不正な表は起動時エラーとして返す。
    pub fn load_role_table(&self) -> AppResult<RoleTable> {
        let Some(path) = &self.role_table_path else {
            return Ok(RoleTable::standard());
        };

        let document = fs::read_to_string(path).map_err(|e| {
            internal_server_error(e, "config::load_role_table", "Failed to read role table file")
        })?;
        let table = RoleTable::from_json(&document)?;
        info!(path = %path, "Loaded role table override");

        Ok(table)
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_test(&self) -> bool {
        self.environment == "test"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// テスト用の設定を作成
    pub fn for_testing() -> Self {
        Self {
            environment: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 5000,
            jwt_secret: "test-secret-key-that-is-at-least-32-characters-long".to_string(),
            jwt_issuer: "school-backend".to_string(),
            access_token_expiry_minutes: 15,
            role_table_path: None,
        }
    }
}
