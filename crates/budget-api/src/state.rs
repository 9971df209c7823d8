//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! `Arc<AppState>`로 래핑되어 Axum의 State extractor를 통해 주입됩니다.

use sqlx::SqlitePool;

use crate::auth::JwtConfig;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 풀 (SQLite)
    pub db: SqlitePool,

    /// 토큰 발급/검증기
    pub jwt: JwtConfig,

    /// 서버 시작 시간
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(db: SqlitePool, jwt: JwtConfig) -> Self {
        Self {
            db,
            jwt,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임 (초).
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }

    /// 데이터베이스 연결 상태 확인.
    pub async fn is_db_healthy(&self) -> bool {
        crate::database::health_check(&self.db).await
    }
}

/// 테스트용 상태 생성 (인메모리 DB, 마이그레이션 적용).
pub async fn create_test_state() -> Result<AppState, sqlx::Error> {
    let db = crate::database::connect_in_memory().await?;
    Ok(AppState::new(
        db,
        JwtConfig::new("test-secret-key-for-jwt-testing-minimum-32-chars", 30),
    ))
}
