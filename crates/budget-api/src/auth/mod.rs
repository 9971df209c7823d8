//! 인증.
//!
//! # 구성 요소
//!
//! - [`JwtConfig`]: Access Token 발급/검증기
//! - [`CurrentUser`]: Bearer 토큰으로 사용자를 확인하는 추출기
//! - [`register`] / [`authenticate`]: 회원가입과 로그인
//! - Argon2 비밀번호 해싱

mod credentials;
mod jwt;
mod middleware;
mod password;

pub use credentials::{authenticate, register, validate_password, validate_username};
pub use jwt::{create_token, decode_token, Claims, JwtConfig, JwtError, TokenResponse};
pub use middleware::{bearer_token, CurrentUser};
pub use password::{
    hash_password, hash_password_blocking, verify_password, verify_password_blocking,
    PasswordError,
};
