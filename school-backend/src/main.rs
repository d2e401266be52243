// src/main.rs
use school_backend::api::{app_router, AppState};
use school_backend::config::AppConfig;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "school_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting School Backend server...");

    // 設定を読み込む
    let app_config = AppConfig::from_env()?;
    tracing::info!(
        environment = %app_config.environment,
        role_table_path = ?app_config.role_table_path,
        "Configuration loaded"
    );

    // ロール表の構築（不正な表は起動を中断する）
    let role_table = app_config.load_role_table().map_err(|e| {
        tracing::error!(error = %e, "Failed to build role table");
        e
    })?;
    tracing::info!("Role table validated.");

    let server_addr = app_config.server_addr();
    let app_state = Arc::new(AppState::new(app_config, role_table)?);

    // ルーターの設定
    let app_router = app_router(app_state);

    // サーバーの起動
    tracing::info!("Router configured. Server listening on {}", server_addr);

    let listener = TcpListener::bind(&server_addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
