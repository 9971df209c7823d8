//! 가계부 시스템의 에러 타입.
//!
//! 자격증명, 토큰, 소유권 범위 저장소에서 발생하는 모든 실패를
//! 하나의 분류 체계로 정의합니다. HTTP 상태 코드로의 변환은 API 계층이 담당합니다.

use thiserror::Error;

/// 핵심 도메인 에러.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// 이미 존재하는 사용자 이름
    #[error("이미 사용 중인 사용자 이름입니다: {0}")]
    DuplicateUsername(String),

    /// 사용자 이름 또는 비밀번호 불일치
    #[error("사용자 이름 또는 비밀번호가 올바르지 않습니다")]
    InvalidCredentials,

    /// 서명 불일치, 형식 오류, 만료된 토큰
    #[error("유효하지 않은 토큰")]
    InvalidToken,

    /// 토큰의 주체가 더 이상 존재하지 않음
    #[error("토큰 주체를 찾을 수 없습니다")]
    UnknownSubject,

    /// 레코드 없음 (타인 소유 레코드 포함)
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 요청 페이로드 검증 실패
    #[error("잘못된 입력: {0}")]
    Validation(String),

    /// 데이터베이스 에러
    #[error("데이터베이스 에러: {0}")]
    Database(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 도메인 작업을 위한 Result 타입.
pub type BudgetResult<T> = Result<T, BudgetError>;

impl BudgetError {
    /// 인증 실패 계열인지 확인합니다.
    ///
    /// 호출자에게는 어떤 단계에서 실패했는지 구분하지 않고
    /// 하나의 "unauthorized" 조건으로만 노출됩니다.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            BudgetError::InvalidCredentials
                | BudgetError::InvalidToken
                | BudgetError::UnknownSubject
        )
    }

    /// 서버 측 장애인지 확인합니다.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            BudgetError::Database(_) | BudgetError::Config(_) | BudgetError::Internal(_)
        )
    }

    /// 엔티티 종류와 ID로 NotFound 에러를 생성합니다.
    pub fn not_found(entity: &str, id: i64) -> Self {
        BudgetError::NotFound(format!("{} {}", entity, id))
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for BudgetError {
    fn from(err: config::ConfigError) -> Self {
        BudgetError::Config(err.to_string())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for BudgetError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => BudgetError::NotFound("row".to_string()),
            other => BudgetError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_unauthorized() {
        assert!(BudgetError::InvalidCredentials.is_unauthorized());
        assert!(BudgetError::InvalidToken.is_unauthorized());
        assert!(BudgetError::UnknownSubject.is_unauthorized());

        assert!(!BudgetError::not_found("debt", 1).is_unauthorized());
        assert!(!BudgetError::DuplicateUsername("alice".to_string()).is_unauthorized());
    }

    #[test]
    fn test_error_internal() {
        assert!(BudgetError::Database("locked".to_string()).is_internal());
        assert!(!BudgetError::Validation("name".to_string()).is_internal());
    }

    #[test]
    fn test_not_found_message() {
        let err = BudgetError::not_found("dump bin", 42);
        assert_eq!(err.to_string(), "찾을 수 없음: dump bin 42");
    }
}
