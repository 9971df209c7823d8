//! 사용자 계정.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 저장된 사용자 레코드.
///
/// 비밀번호 해시를 포함하므로 클라이언트에 직접 직렬화하지 않습니다.
/// 응답에는 [`UserIdentity`]를 사용합니다.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// 외부에 노출 가능한 식별 정보만 추출합니다.
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// 클라이언트에 노출되는 사용자 식별 정보.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct UserIdentity {
    /// 사용자 ID
    pub id: i64,
    /// 사용자 이름
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_hides_password_hash() {
        let user = User {
            id: 7,
            username: "alice".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user.identity()).unwrap();
        assert_eq!(json, r#"{"id":7,"username":"alice"}"#);
        assert!(!json.contains("argon2"));
    }
}
