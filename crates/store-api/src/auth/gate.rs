//! 역할 게이트.
//!
//! 역할 비교는 대소문자를 구분하는 정확한 문자열 일치입니다. 역할 계층은 없습니다.

use super::{AuthError, IdentityContext};

/// 관리자 역할.
pub const ADMIN_ROLE: &str = "admin";

/// 컨텍스트의 호출자가 요구 역할을 가지는지 확인합니다.
///
/// 토큰은 다시 검증하지 않으며 인증 미들웨어가 남긴 컨텍스트만 읽습니다.
pub fn authorize(ctx: &IdentityContext, required_role: &str) -> Result<(), AuthError> {
    match ctx.role() {
        None => Err(AuthError::MissingPrincipal),
        Some(role) if role == required_role => Ok(()),
        Some(_) => Err(AuthError::Forbidden),
    }
}

/// 라우트 그룹에 요구되는 역할. `require_role` 미들웨어의 상태로 사용됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredRole(pub &'static str);

impl RequiredRole {
    pub fn admin() -> Self {
        Self(ADMIN_ROLE)
    }
}
