//! 사용자 계정 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 저장된 사용자 계정.
///
/// `password`에는 항상 해시된 자격증명만 들어가며 응답으로 직렬화되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// 새 사용자 입력.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// 사용자 수정 입력 (전체 필드 교체).
///
/// `password`는 평문이거나 이미 해시된 값일 수 있습니다.
#[derive(Debug, Clone, Deserialize)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl User {
    /// 수정 입력을 적용한 사본을 반환합니다.
    pub fn apply(&self, update: UserUpdate) -> Self {
        Self {
            id: self.id,
            name: update.name,
            email: update.email,
            password: update.password,
            role: update.role,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 7,
            name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA".to_string(),
            role: "admin".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_is_never_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["id"], 7);
        assert_eq!(json["role"], "admin");
    }

    #[test]
    fn test_apply_keeps_identity() {
        let user = sample_user();
        let updated = user.apply(UserUpdate {
            name: "alice2".to_string(),
            email: "alice2@example.com".to_string(),
            password: "plain".to_string(),
            role: "user".to_string(),
        });
        assert_eq!(updated.id, user.id);
        assert_eq!(updated.created_at, user.created_at);
        assert_eq!(updated.name, "alice2");
        assert_eq!(updated.password, "plain");
    }
}
