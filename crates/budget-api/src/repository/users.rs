//! User Repository
//!
//! 사용자 계정 저장소. 비밀번호 해시는 이 계층 밖에서 계산됩니다.

use budget_core::{BudgetError, BudgetResult, User};
use sqlx::SqlitePool;

/// User Repository
pub struct UserRepository;

impl UserRepository {
    /// 사용자 생성.
    ///
    /// `username` 유니크 제약 위반은 [`BudgetError::DuplicateUsername`]으로 변환됩니다.
    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        password_hash: &str,
    ) -> BudgetResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES (?1, ?2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                BudgetError::DuplicateUsername(username.to_string())
            }
            other => other.into(),
        })
    }

    /// 사용자 이름으로 조회.
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// ID로 조회.
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// 사용자 삭제. 소유한 레코드는 함께 삭제됩니다.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM allocation_items
            WHERE category_id IN (SELECT id FROM categories WHERE user_id = ?1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        for table in ["categories", "dump_bins", "debts"] {
            sqlx::query(&format!("DELETE FROM {} WHERE user_id = ?1", table))
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
