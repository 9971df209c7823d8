//! # Budget Core
//!
//! 가계부 백엔드의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! - 저축 통(Dump Bin), 부채, 예산 카테고리/배분 항목 레코드
//! - 수입 배분 및 순자산 계산
//! - 에러 분류 체계
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::{init_logging, LogConfig, LogFormat};
