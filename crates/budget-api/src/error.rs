//! 통합 API 에러 응답 타입.
//!
//! 도메인 에러([`BudgetError`])를 HTTP 상태 코드와 일관된 JSON 본문으로 변환합니다.
//!
//! | 도메인 에러 | 상태 | 코드 |
//! |---|---|---|
//! | `DuplicateUsername` | 400 | `DUPLICATE_USERNAME` |
//! | `InvalidCredentials` / `InvalidToken` / `UnknownSubject` | 401 | `UNAUTHORIZED` |
//! | `NotFound` | 404 | `NOT_FOUND` |
//! | `Validation` | 422 | `VALIDATION_ERROR` |
//! | 그 외 | 500 | `INTERNAL_ERROR` |

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use budget_core::BudgetError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::auth::{JwtError, PasswordError};

/// 통합 API 에러 응답 본문.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "찾을 수 없음: debt 3",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "UNAUTHORIZED", "NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (필드별 검증 실패 등)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 상세 정보를 추가합니다.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// 핸들러 에러.
///
/// 도메인 에러와 선택적 상세 정보를 담고, 응답 시점에 상태 코드를 결정합니다.
#[derive(Debug)]
pub struct ApiError {
    error: BudgetError,
    details: Option<Value>,
}

impl ApiError {
    /// 422 검증 에러.
    pub fn validation(message: impl Into<String>) -> Self {
        BudgetError::Validation(message.into()).into()
    }

    /// 401 인증 에러.
    pub fn unauthorized() -> Self {
        BudgetError::InvalidToken.into()
    }

    /// 상세 정보를 추가합니다.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// 내부 도메인 에러.
    pub fn inner(&self) -> &BudgetError {
        &self.error
    }

    /// HTTP 상태 코드.
    pub fn status(&self) -> StatusCode {
        match &self.error {
            BudgetError::DuplicateUsername(_) => StatusCode::BAD_REQUEST,
            BudgetError::InvalidCredentials
            | BudgetError::InvalidToken
            | BudgetError::UnknownSubject => StatusCode::UNAUTHORIZED,
            BudgetError::NotFound(_) => StatusCode::NOT_FOUND,
            BudgetError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BudgetError::Database(_) | BudgetError::Config(_) | BudgetError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 응답 본문.
    ///
    /// 인증 실패는 어느 단계에서 실패했는지 구분하지 않고,
    /// 서버 장애는 내부 메시지를 노출하지 않습니다.
    pub fn body(&self) -> ApiErrorResponse {
        let response = match &self.error {
            BudgetError::DuplicateUsername(_) => {
                ApiErrorResponse::new("DUPLICATE_USERNAME", self.error.to_string())
            }
            BudgetError::InvalidCredentials => {
                ApiErrorResponse::new("UNAUTHORIZED", self.error.to_string())
            }
            BudgetError::InvalidToken | BudgetError::UnknownSubject => {
                ApiErrorResponse::new("UNAUTHORIZED", "인증 정보를 확인할 수 없습니다")
            }
            BudgetError::NotFound(_) => ApiErrorResponse::new("NOT_FOUND", self.error.to_string()),
            BudgetError::Validation(_) => {
                ApiErrorResponse::new("VALIDATION_ERROR", self.error.to_string())
            }
            BudgetError::Database(_) | BudgetError::Config(_) | BudgetError::Internal(_) => {
                ApiErrorResponse::new("INTERNAL_ERROR", "서버 내부 오류가 발생했습니다")
            }
        };

        match &self.details {
            Some(details) => response.with_details(details.clone()),
            None => response,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if self.error.is_internal() {
            tracing::error!(error = %self.error, "Request failed");
        }

        let mut response = (status, Json(self.body())).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<BudgetError> for ApiError {
    fn from(error: BudgetError) -> Self {
        Self {
            error,
            details: None,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        BudgetError::from(err).into()
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::EncodingError(e) => BudgetError::Internal(e.to_string()).into(),
            _ => BudgetError::InvalidToken.into(),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        BudgetError::Internal(err.to_string()).into()
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;
