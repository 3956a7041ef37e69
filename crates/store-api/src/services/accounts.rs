//! 계정 서비스.
//!
//! 자격증명을 쓰는 모든 경로(생성, 수정)는 저장소로 넘기기 전에 해시를 거칩니다.
//! 이미 해시된 값은 다시 해시하지 않습니다.

use std::sync::Arc;

use store_core::{NewUser, User, UserUpdate};
use tracing::{info, warn};

use super::ServiceError;
use crate::auth::{CredentialHasher, IssuedToken, Principal, TokenIssuer};
use crate::metrics::record_login;
use crate::repository::UserStore;

/// 계정 서비스.
pub struct AccountService {
    store: Arc<dyn UserStore>,
    hasher: CredentialHasher,
    issuer: TokenIssuer,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("hasher", &self.hasher)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        warn!(field, "Rejected account input with empty field");
        return Err(ServiceError::validation(format!("{} is empty", field)));
    }
    Ok(())
}

fn require_valid_id(id: i64) -> Result<(), ServiceError> {
    if id <= 0 {
        warn!(id, "Rejected invalid user id");
        return Err(ServiceError::validation("invalid user id"));
    }
    Ok(())
}

fn check_account_fields(
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> Result<(), ServiceError> {
    require_non_empty("name", name)?;
    require_non_empty("email", email)?;
    if password.is_empty() {
        warn!("Rejected account input with empty password");
        return Err(ServiceError::validation("password is empty"));
    }
    require_non_empty("role", role)
}

impl AccountService {
    pub fn new(store: Arc<dyn UserStore>, hasher: CredentialHasher, issuer: TokenIssuer) -> Self {
        Self {
            store,
            hasher,
            issuer,
        }
    }

    /// 새 계정을 생성합니다.
    ///
    /// 비밀번호는 정확히 한 번 해시된 뒤 저장됩니다.
    pub async fn create_user(&self, user: NewUser) -> Result<User, ServiceError> {
        check_account_fields(&user.name, &user.email, &user.password, &user.role)?;

        if self.store.find_by_email(&user.email).await?.is_some() {
            warn!(email = %user.email, "Email already registered");
            return Err(ServiceError::Conflict("email already registered".to_string()));
        }

        let password = self.hasher.hash(&user.password)?;
        let created = self
            .store
            .create(NewUser { password, ..user })
            .await?;

        info!(user_id = created.id, role = %created.role, "User created");
        Ok(created)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.store.list().await?)
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<User, ServiceError> {
        require_valid_id(id)?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("user {}", id)))
    }

    pub async fn get_user_by_username(&self, name: &str) -> Result<User, ServiceError> {
        require_non_empty("username", name)?;
        self.store
            .find_by_name(name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("user {}", name)))
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<User, ServiceError> {
        require_non_empty("email", email)?;
        self.store
            .find_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("user {}", email)))
    }

    /// 계정 전체 필드를 교체합니다.
    ///
    /// 평문 비밀번호는 한 번 해시하고, 이미 해시된 값은 그대로 저장합니다.
    /// 설정보다 비싼 계수를 담은 PHC 문자열은 해시로 인정하지 않고 평문으로 해시합니다.
    pub async fn update_user(&self, id: i64, update: UserUpdate) -> Result<User, ServiceError> {
        require_valid_id(id)?;
        check_account_fields(&update.name, &update.email, &update.password, &update.role)?;

        let existing = self.get_user_by_id(id).await?;

        let password = if self.hasher.is_hashed(&update.password) {
            update.password
        } else {
            self.hasher.hash(&update.password)?
        };
        let updated = existing.apply(UserUpdate { password, ..update });

        if !self.store.update(&updated).await? {
            return Err(ServiceError::NotFound(format!("user {}", id)));
        }

        info!(user_id = id, "User updated");
        Ok(updated)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ServiceError> {
        require_valid_id(id)?;
        if !self.store.delete(id).await? {
            return Err(ServiceError::NotFound(format!("user {}", id)));
        }

        info!(user_id = id, "User deleted");
        Ok(())
    }

    /// 이메일/비밀번호로 로그인하고 Access Token을 발급합니다.
    ///
    /// 없는 이메일과 틀린 비밀번호는 구분하지 않습니다.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, ServiceError> {
        let Some(user) = self.store.find_by_email(email).await? else {
            warn!("Login failed: unknown email");
            record_login("rejected");
            return Err(ServiceError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password)? {
            warn!(user_id = user.id, "Login failed: wrong password");
            record_login("rejected");
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.issuer.issue(&Principal::new(user.id, user.role.clone()))?;

        record_login("accepted");
        info!(user_id = user.id, "User logged in");
        Ok(token)
    }
}
