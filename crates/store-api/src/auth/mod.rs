//! 인증 및 권한 부여.
//!
//! JWT 기반 인증과 역할 기반 접근 제어를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`CredentialHasher`]: Argon2id 자격증명 해싱/검증
//! - [`TokenVerifier`] / [`TokenIssuer`]: HS256 토큰 검증 및 발급
//! - [`IdentityContext`]: 요청 단위 인증 상태
//! - [`authorize`]: 역할 게이트
//! - [`require_auth`] / [`require_role`]: 라우트 그룹용 미들웨어
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! async fn protected_handler(
//!     Authenticated(principal): Authenticated,
//! ) -> impl IntoResponse {
//!     format!("Hello, {}!", principal.user_id)
//! }
//! ```

mod context;
mod error;
mod gate;
mod jwt;
mod middleware;
mod password;

pub use context::{Authenticated, IdentityContext, Principal};
pub use error::AuthError;
pub use gate::{authorize, RequiredRole, ADMIN_ROLE};
pub use jwt::{Claims, IssuedToken, TokenError, TokenIssuer, TokenVerifier};
pub use middleware::{require_auth, require_role};
pub use password::{CredentialHasher, PasswordError};
