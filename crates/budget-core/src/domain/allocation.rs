//! 주간 수입 배분 계산기.
//!
//! 수입을 needs / living / playing / booster 네 개의 통으로 나눕니다.
//! booster는 나머지를 모두 흡수하므로 네 값의 합은 항상 수입과 같습니다.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 필수 지출 비율
pub const NEEDS_RATIO: Decimal = dec!(0.58);
/// 생활비 비율
pub const LIVING_RATIO: Decimal = dec!(0.13);
/// 여가 비율
pub const PLAYING_RATIO: Decimal = dec!(0.17);

/// 수입 배분 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    #[serde(with = "rust_decimal::serde::float")]
    #[cfg_attr(feature = "utoipa-support", schema(value_type = f64))]
    pub needs: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[cfg_attr(feature = "utoipa-support", schema(value_type = f64))]
    pub living: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[cfg_attr(feature = "utoipa-support", schema(value_type = f64))]
    pub playing: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[cfg_attr(feature = "utoipa-support", schema(value_type = f64))]
    pub booster: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[cfg_attr(feature = "utoipa-support", schema(value_type = f64))]
    pub total_income: Decimal,
}

impl Allocation {
    /// 수입을 고정 비율로 분할합니다.
    ///
    /// 각 통은 소수점 둘째 자리에서 반올림하고, 반올림 오차는 booster가 흡수합니다.
    pub fn split(income: Decimal) -> Self {
        let part = |ratio: Decimal| {
            (income * ratio).round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
        };

        let needs = part(NEEDS_RATIO);
        let living = part(LIVING_RATIO);
        let playing = part(PLAYING_RATIO);
        let booster = income - needs - living - playing;

        Self {
            needs,
            living,
            playing,
            booster,
            total_income: income,
        }
    }
}
