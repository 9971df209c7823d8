//! 분석 쿼리 (읽기 전용).

use budget_core::{BudgetResult, NetWorth};
use sqlx::SqliteConnection;

/// Analytics Repository
pub struct AnalyticsRepository;

impl AnalyticsRepository {
    /// 순자산 = Dump Bin 잔액 합계 - 남은 부채 합계.
    pub async fn net_worth(conn: &mut SqliteConnection, owner_id: i64) -> BudgetResult<NetWorth> {
        let (savings, debt): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COALESCE(SUM(current_amount), 0) FROM dump_bins WHERE user_id = ?1),
                (SELECT COALESCE(SUM(remaining_amount), 0) FROM debts WHERE user_id = ?1)
            "#,
        )
        .bind(owner_id)
        .fetch_one(conn)
        .await?;

        Ok(NetWorth::from_totals(savings, debt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connect_in_memory;
    use crate::repository::{
        DebtInput, DebtRepository, DumpBinInput, DumpBinRepository, UserRepository,
    };

    #[tokio::test]
    async fn test_net_worth() {
        let pool = connect_in_memory().await.unwrap();
        let alice = UserRepository::create(&pool, "alice", "h").await.unwrap();
        let bob = UserRepository::create(&pool, "bob", "h").await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let empty = AnalyticsRepository::net_worth(&mut conn, alice.id)
            .await
            .unwrap();
        assert_eq!(empty.net_worth, 0);

        for (name, current) in [("Jar", 300), ("Trip", 200)] {
            DumpBinRepository::create(
                &mut conn,
                alice.id,
                &DumpBinInput {
                    name: name.to_string(),
                    target_amount: 1000,
                    current_amount: current,
                    is_dump_bin: true,
                },
            )
            .await
            .unwrap();
        }
        DebtRepository::create(
            &mut conn,
            alice.id,
            &DebtInput {
                name: "Card".to_string(),
                total_amount: 800,
                remaining_amount: Some(650),
                target_date: None,
            },
        )
        .await
        .unwrap();

        let summary = AnalyticsRepository::net_worth(&mut conn, alice.id)
            .await
            .unwrap();
        assert_eq!(summary.total_assets, 500);
        assert_eq!(summary.total_debt, 650);
        assert_eq!(summary.net_worth, -150);

        let other = AnalyticsRepository::net_worth(&mut conn, bob.id)
            .await
            .unwrap();
        assert_eq!(other.total_assets, 0);
    }
}
