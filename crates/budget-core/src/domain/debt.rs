//! 부채.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 부채 레코드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct Debt {
    pub id: i64,
    /// 소유자 ID
    pub user_id: i64,
    pub name: String,
    /// 최초 부채 총액
    pub total_amount: i64,
    /// 남은 금액
    pub remaining_amount: i64,
    /// 상환 목표일 (YYYY-MM-DD)
    pub target_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// 상환 후 남은 금액. 0 아래로 내려가지 않습니다.
pub fn apply_payment(remaining_amount: i64, amount: i64) -> i64 {
    remaining_amount.saturating_sub(amount).max(0)
}
