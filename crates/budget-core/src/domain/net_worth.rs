//! 순자산 요약.

use serde::{Deserialize, Serialize};

/// 사용자 순자산 요약.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NetWorth {
    /// 저축 통 잔액 합계
    pub total_assets: i64,
    /// 남은 부채 합계
    pub total_debt: i64,
    /// 자산 - 부채
    pub net_worth: i64,
    pub breakdown: NetWorthBreakdown,
}

/// 순자산 세부 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct NetWorthBreakdown {
    pub savings: i64,
    pub debt: i64,
}

impl NetWorth {
    /// 저축 합계와 부채 합계로 요약을 만듭니다.
    pub fn from_totals(savings: i64, debt: i64) -> Self {
        Self {
            total_assets: savings,
            total_debt: debt,
            net_worth: savings.saturating_sub(debt),
            breakdown: NetWorthBreakdown { savings, debt },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_totals() {
        let summary = NetWorth::from_totals(1500, 4000);
        assert_eq!(summary.net_worth, -2500);
        assert_eq!(summary.breakdown.savings, 1500);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalAssets"], 1500);
        assert_eq!(json["netWorth"], -2500);
    }
}
