//! Dump Bin - 목표 금액이 있는 저축 통.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 저축 통 레코드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct DumpBin {
    pub id: i64,
    /// 소유자 ID
    pub user_id: i64,
    pub name: String,
    /// 목표 금액
    pub target_amount: i64,
    /// 현재 모인 금액
    pub current_amount: i64,
    /// 잔돈 모으기 통 여부 (일반 저축 목표와 구분)
    pub is_dump_bin: bool,
    pub created_at: DateTime<Utc>,
}

/// 적립(음수면 인출) 후의 잔액.
///
/// 잔액은 0 아래로 내려가지 않습니다.
pub fn apply_contribution(current_amount: i64, amount: i64) -> i64 {
    current_amount.saturating_add(amount).max(0)
}
