//! JWT 토큰 처리.
//!
//! Access Token 발급/검증 로직. 토큰의 `sub`는 사용자 이름입니다.

use budget_core::{AuthConfig, User};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT Access Token 페이로드.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 이름
    pub sub: String,
    /// 사용자 ID
    pub uid: i64,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// JWT ID - 토큰 고유 식별자
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// # Arguments
    ///
    /// * `user_id` - 사용자 ID
    /// * `username` - 사용자 이름 (subject)
    /// * `expires_in_minutes` - 만료 시간 (분)
    pub fn new(user_id: i64, username: impl Into<String>, expires_in_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: username.into(),
            uid: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(expires_in_minutes)).timestamp(),
            jti: Some(uuid::Uuid::new_v4().to_string()),
        }
    }
}

/// 토큰 발급 응답 (OAuth2 password flow 형식).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Access Token
    pub access_token: String,
    /// 토큰 타입 (항상 "bearer")
    pub token_type: String,
    /// 만료까지 남은 시간 (초)
    pub expires_in: i64,
}

/// JWT 토큰 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("토큰 인코딩 실패: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("토큰 디코딩 실패")]
    DecodingError,
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("잘못된 토큰 형식")]
    InvalidToken,
}

/// Access Token 생성.
///
/// # Returns
///
/// 인코딩된 JWT 문자열
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(JwtError::from)
}

/// JWT 토큰 디코딩 및 검증 (서명, 형식, 만료).
pub fn decode_token(token: &str, secret: &str) -> Result<TokenData<Claims>, JwtError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        jsonwebtoken::errors::ErrorKind::InvalidToken => JwtError::InvalidToken,
        _ => JwtError::DecodingError,
    })
}

/// 토큰 발급/검증기.
///
/// 서명 키와 고정 만료 시간을 보관하며 `AppState`를 통해 주입됩니다.
#[derive(Clone)]
pub struct JwtConfig {
    secret: String,
    expires_in_minutes: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("expires_in_minutes", &self.expires_in_minutes)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expires_in_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            expires_in_minutes,
        }
    }

    /// 사용자에게 Access Token을 발급합니다.
    pub fn issue(&self, user: &User) -> Result<TokenResponse, JwtError> {
        let claims = Claims::new(user.id, &user.username, self.expires_in_minutes);
        let access_token = create_token(&claims, &self.secret)?;

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.expires_in_minutes * 60,
        })
    }

    /// 토큰을 검증하고 Claims를 반환합니다.
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        decode_token(token, &self.secret).map(|data| data.claims)
    }

    /// 임의의 Claims로 토큰을 서명합니다 (테스트/운영 도구용).
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        create_token(claims, &self.secret)
    }
}

impl From<&AuthConfig> for JwtConfig {
    fn from(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret.clone(), config.token_expire_minutes)
    }
}
