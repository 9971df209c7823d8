//! 가계부 REST API 서버.
//!
//! 사용자 등록과 로그인, 사용자별 가계부 레코드 관리,
//! 정적 프론트엔드 번들 서빙을 제공합니다.

pub mod auth;
pub mod database;
pub mod error;
pub mod extract;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use routes::create_router;
pub use state::AppState;
