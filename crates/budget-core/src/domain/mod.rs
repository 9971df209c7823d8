//! 가계부 도메인 모델.
//!
//! 저장소 행(row)과 그 위에서 동작하는 순수 계산을 정의합니다.
//! 소유자 ID(`user_id`)는 서버가 채우며 입력 스키마에는 존재하지 않습니다.

mod allocation;
mod category;
mod debt;
mod dump_bin;
mod net_worth;
mod user;

pub use allocation::*;
pub use category::*;
pub use debt::*;
pub use dump_bin::*;
pub use net_worth::*;
pub use user::*;
