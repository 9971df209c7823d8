//! 검증 포함 요청 추출기.
//!
//! 본문 파싱 실패, 경로 파라미터 파싱 실패, 필드 검증 실패를 모두 422 JSON 에러로 응답합니다.

use axum::{
    extract::{rejection::PathRejection, FromRequest, FromRequestParts, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::ApiError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// JSON 본문을 역직렬화한 뒤 `validator` 규칙을 적용합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::validation(rejection.body_text()))?;

        validate(&value)?;
        Ok(ValidatedJson(value))
    }
}

/// 경로 파라미터 추출기.
///
/// `axum::extract::Path`와 같지만 파싱 실패(예: 숫자가 아닌 `{id}`)를 [`ApiError`]로 응답합니다.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

/// 필드 검증. 실패 시 필드별 에러를 `details`에 담습니다.
pub fn validate<T: Validate>(value: &T) -> Result<(), ApiError> {
    value.validate().map_err(|errors| {
        let details = serde_json::to_value(&errors).unwrap_or_default();
        ApiError::validation(errors.to_string()).with_details(details)
    })
}

/// 로그인 요청.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 로그인 본문 추출기.
///
/// `application/x-www-form-urlencoded` (OAuth2 password flow)와 JSON을 모두 받습니다.
#[derive(Debug, Clone)]
pub struct LoginForm(pub LoginRequest);

impl<S> FromRequest<S> for LoginForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE));

        let login = if is_form {
            Form::<LoginRequest>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::validation(rejection.body_text()))?
                .0
        } else {
            Json::<LoginRequest>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::validation(rejection.body_text()))?
                .0
        };

        Ok(LoginForm(login))
    }
}
