//! 요청 단위 인증 컨텍스트.
//!
//! 인증 미들웨어가 토큰 검증에 성공하면 `IdentityContext`를 요청 extensions에
//! 삽입합니다. 이후 역할 게이트와 핸들러는 이 값만 읽습니다.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Serialize;

use super::AuthError;

/// 검증된 토큰에서 얻은 호출자 정보.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub user_id: i64,
    pub role: String,
}

impl Principal {
    pub fn new(user_id: i64, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
        }
    }
}

/// 요청 하나에 묶인 인증 상태.
///
/// 비어 있는 상태로 시작하며 `establish`로 한 번만 채워집니다.
/// 요청 간에 공유되지 않습니다.
#[derive(Debug, Clone, Default)]
pub struct IdentityContext {
    principal: Option<Principal>,
}

impl IdentityContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 인증된 호출자를 기록합니다.
    ///
    /// 이미 기록된 경우 기존 값을 유지하고 `false`를 반환합니다.
    pub fn establish(&mut self, principal: Principal) -> bool {
        if self.principal.is_some() {
            return false;
        }
        self.principal = Some(principal);
        true
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.principal.as_ref().map(|p| p.user_id)
    }

    pub fn role(&self) -> Option<&str> {
        self.principal.as_ref().map(|p| p.role.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}

/// 인증된 호출자 추출기.
///
/// 인증 미들웨어 뒤에 있는 핸들러에서만 성공합니다.
///
/// ```rust,ignore
/// async fn me(Authenticated(principal): Authenticated) -> impl IntoResponse {
///     format!("user {}", principal.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Authenticated(pub Principal);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<IdentityContext>()
            .and_then(IdentityContext::principal)
            .cloned()
            .map(Authenticated)
            .ok_or(AuthError::MissingPrincipal)
    }
}
