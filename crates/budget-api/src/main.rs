//! 가계부 API 서버.
//!
//! 설정을 로드하고 데이터베이스를 준비한 뒤 Axum 서버를 시작합니다.

use std::sync::Arc;

use anyhow::Context;
use budget_core::{init_logging, AppConfig, LogConfig};
use tracing::{error, info, warn};
use utoipa::OpenApi as _;

use budget_api::auth::JwtConfig;
use budget_api::openapi::ApiDoc;
use budget_api::{create_router, database, AppState};

/// `--export-openapi` 플래그가 있으면 OpenAPI 스펙을 stdout으로 출력합니다.
fn export_openapi_requested() -> bool {
    std::env::args().any(|arg| arg == "--export-openapi")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    if export_openapi_requested() {
        println!("{}", serde_json::to_string_pretty(&ApiDoc::openapi())?);
        return Ok(());
    }

    let config = AppConfig::load_default().context("설정 로드 실패")?;

    init_logging(LogConfig::from(&config.logging))
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    info!("Starting Budget API server...");

    if config.auth.uses_default_secret() {
        warn!("BUDGET__AUTH__JWT_SECRET not set, using default (INSECURE for development only)");
    }

    let pool = database::connect(&config.database)
        .await
        .context("데이터베이스 연결 실패")?;
    database::migrate(&pool)
        .await
        .context("DB 마이그레이션 적용 실패")?;
    info!("Database migrations applied");

    let state = Arc::new(AppState::new(pool.clone(), JwtConfig::from(&config.auth)));
    info!(version = %state.version, "Application state initialized");

    let app = create_router(state, &config);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("{} 바인딩 실패", addr))?;

    info!(%addr, "API server listening");
    info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기 (Ctrl+C 또는 SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
