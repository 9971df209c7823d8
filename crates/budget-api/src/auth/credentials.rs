//! 회원가입과 자격증명 확인.

use budget_core::{BudgetError, BudgetResult, User};
use sqlx::SqlitePool;
use tracing::{info, warn};

use super::password::{hash_password_blocking, verify_password_blocking};
use crate::error::ApiResult;
use crate::repository::UserRepository;

/// 사용자 이름 최소 길이
pub const USERNAME_MIN_LEN: usize = 3;
/// 사용자 이름 최대 길이
pub const USERNAME_MAX_LEN: usize = 50;
/// 비밀번호 최대 길이
pub const PASSWORD_MAX_LEN: usize = 128;

/// 사용자 이름 형식 검사. `[A-Za-z0-9_.-]` 3~50자.
pub fn validate_username(username: &str) -> BudgetResult<()> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(BudgetError::Validation(format!(
            "username은 {}~{}자여야 합니다",
            USERNAME_MIN_LEN, USERNAME_MAX_LEN
        )));
    }
    if !username.chars().all(is_username_char) {
        return Err(BudgetError::Validation(
            "username에는 영문, 숫자, '_', '.', '-'만 사용할 수 있습니다".to_string(),
        ));
    }
    Ok(())
}

fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// 비밀번호 형식 검사. 1~128자.
pub fn validate_password(password: &str) -> BudgetResult<()> {
    let len = password.chars().count();
    if len == 0 || len > PASSWORD_MAX_LEN {
        return Err(BudgetError::Validation(format!(
            "password는 1~{}자여야 합니다",
            PASSWORD_MAX_LEN
        )));
    }
    Ok(())
}

/// 새 사용자를 등록합니다.
///
/// 중복 검사 후 해시를 계산하며, 동시 가입 경쟁은 유니크 제약이 최종 판정합니다.
pub async fn register(pool: &SqlitePool, username: &str, password: &str) -> ApiResult<User> {
    validate_username(username)?;
    validate_password(password)?;

    if UserRepository::find_by_username(pool, username).await?.is_some() {
        return Err(BudgetError::DuplicateUsername(username.to_string()).into());
    }

    let hash = hash_password_blocking(password.to_string()).await?;
    let user = UserRepository::create(pool, username, &hash).await?;

    info!(user_id = user.id, username = %user.username, "User registered");
    Ok(user)
}

/// 사용자 이름과 비밀번호를 확인합니다.
///
/// 사용자가 없거나 비밀번호가 틀리면 같은 [`BudgetError::InvalidCredentials`]를 반환합니다.
pub async fn authenticate(pool: &SqlitePool, username: &str, password: &str) -> ApiResult<User> {
    let user = UserRepository::find_by_username(pool, username).await?;
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());

    match (verify_password_blocking(password.to_string(), stored_hash).await, user) {
        (Ok(()), Some(user)) => Ok(user),
        _ => {
            warn!(username = %username, "Login failed");
            Err(BudgetError::InvalidCredentials.into())
        }
    }
}
