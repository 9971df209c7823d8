//! 비밀번호 해싱 유틸리티.
//!
//! Argon2 기반 비밀번호 해싱 및 검증.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// 존재하지 않는 사용자 로그인 시 검증에 사용하는 해시.
///
/// 어떤 비밀번호로도 일치하지 않으며, 실제 사용자와 같은 비용으로 검증됩니다.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
    #[error("비밀번호 검증 실패")]
    VerificationFailed,
    #[error("잘못된 해시 형식")]
    InvalidHashFormat,
}

/// 비밀번호 해싱.
///
/// Argon2id 알고리즘을 사용하며 솔트는 자동으로 생성됩니다.
///
/// # Returns
///
/// PHC 형식의 해시 문자열 (솔트 포함)
///
/// # Example
///
/// ```rust,ignore
/// let hash = hash_password("my_secure_password").unwrap();
/// // "$argon2id$v=19$m=19456,t=2,p=1$..."
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| PasswordError::HashingFailed)?;

    Ok(hash.to_string())
}

/// 비밀번호 검증.
///
/// 저장된 해시와 입력된 비밀번호를 상수 시간으로 비교합니다.
///
/// # Returns
///
/// 비밀번호가 일치하면 Ok(()), 불일치하면 Err
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}

/// 사용자가 없을 때 실행하는 더미 검증.
///
/// 사용자 존재 여부가 응답 시간으로 드러나지 않도록 합니다. 결과는 항상 버려집니다.
pub fn verify_dummy(password: &str) {
    let _ = verify_password(password, DUMMY_HASH);
}

/// 블로킹 스레드에서 해싱합니다.
pub async fn hash_password_blocking(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|_| PasswordError::HashingFailed)?
}

/// 블로킹 스레드에서 검증합니다. `hash`가 None이면 더미 검증 후 실패를 반환합니다.
pub async fn verify_password_blocking(
    password: String,
    hash: Option<String>,
) -> Result<(), PasswordError> {
    tokio::task::spawn_blocking(move || match hash {
        Some(hash) => verify_password(&password, &hash),
        None => {
            verify_dummy(&password);
            Err(PasswordError::VerificationFailed)
        }
    })
    .await
    .map_err(|_| PasswordError::VerificationFailed)?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let password = "TestPassword123!";
        let hash = hash_password(password).unwrap();

        // 해시 형식 확인 (argon2id)
        assert!(hash.starts_with("$argon2id$"));

        assert!(verify_password(password, &hash).is_ok());
        assert!(verify_password("WrongPassword123!", &hash).is_err());
    }

    #[test]
    fn test_different_passwords_different_hashes() {
        let hash1 = hash_password("pw1").unwrap();
        let hash2 = hash_password("pw1").unwrap();

        // 같은 비밀번호라도 솔트가 다르므로 해시가 다름
        assert_ne!(hash1, hash2);
        assert!(verify_password("pw1", &hash1).is_ok());
        assert!(verify_password("pw1", &hash2).is_ok());
    }

    #[test]
    fn test_invalid_hash_format() {
        let result = verify_password("password", "not-a-valid-hash");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
    }

    #[test]
    fn test_dummy_hash_never_matches() {
        assert!(PasswordHash::new(DUMMY_HASH).is_ok());
        assert!(verify_password("", DUMMY_HASH).is_err());
        assert!(verify_password("password", DUMMY_HASH).is_err());
    }

    #[tokio::test]
    async fn test_blocking_helpers() {
        let hash = hash_password_blocking("한글패스워드123".to_string())
            .await
            .unwrap();

        assert!(verify_password_blocking("한글패스워드123".to_string(), Some(hash.clone()))
            .await
            .is_ok());
        assert!(verify_password_blocking("nope".to_string(), Some(hash))
            .await
            .is_err());
        assert!(verify_password_blocking("nope".to_string(), None)
            .await
            .is_err());
    }
}
