//! 데이터베이스 연결과 마이그레이션.

use std::str::FromStr;
use std::time::Duration;

use budget_core::DatabaseConfig;
use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

/// 설정에 따라 연결 풀을 생성합니다. 파일이 없으면 새로 만듭니다.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await?;

    info!(url = %config.url, "Connected to SQLite");
    Ok(pool)
}

/// 인메모리 데이터베이스 (마이그레이션 적용).
///
/// 연결이 닫히면 데이터가 사라지므로 단일 연결을 유지합니다.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// 스키마 마이그레이션 적용.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// 연결 상태 확인.
pub async fn health_check(pool: &SqlitePool) -> bool {
    sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_has_schema() {
        let pool = connect_in_memory().await.unwrap();
        assert!(health_check(&pool).await);

        let tables: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT name FROM sqlite_master
            WHERE type = 'table' AND name NOT LIKE '\_%' ESCAPE '\'
            ORDER BY name
            "#,
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        let names: Vec<_> = tables.into_iter().map(|(name,)| name).collect();

        for expected in ["allocation_items", "categories", "debts", "dump_bins", "users"] {
            assert!(
                names.iter().any(|n| n == expected),
                "missing table {}",
                expected
            );
        }
    }

    #[tokio::test]
    async fn test_connect_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("budget.db").display()),
            max_connections: 2,
            acquire_timeout_secs: 5,
        };

        let pool = connect(&config).await.unwrap();
        migrate(&pool).await.unwrap();
        assert!(health_check(&pool).await);
    }
}
