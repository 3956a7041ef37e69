//! Axum용 인증/인가 미들웨어.
//!
//! 보호된 라우트 그룹에 `route_layer`로 적용합니다. 레이어는 나중에 추가된 것이
//! 먼저 실행되므로 `require_role`을 먼저, `require_auth`를 나중에 추가합니다.
//!
//! ```rust,ignore
//! Router::new()
//!     .route("/", post(create_product))
//!     .route_layer(middleware::from_fn_with_state(RequiredRole::admin(), require_role))
//!     .route_layer(middleware::from_fn_with_state(verifier, require_auth))
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use super::{authorize, AuthError, IdentityContext, RequiredRole, TokenVerifier};
use crate::metrics::record_auth_failure;

fn reject(error: AuthError, request: &Request) -> AuthError {
    warn!(
        reason = error.reason(),
        method = %request.method(),
        path = %request.uri().path(),
        "Request rejected"
    );
    record_auth_failure(error.reason());
    error
}

/// Bearer 토큰을 검증하고 요청에 `IdentityContext`를 설치합니다.
pub async fn require_auth(
    State(verifier): State<Arc<TokenVerifier>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = match request.headers().get(AUTHORIZATION) {
        None => None,
        Some(value) => match value.to_str() {
            Ok(v) => Some(v),
            Err(_) => return Err(reject(AuthError::MalformedCredential, &request)),
        },
    };

    let principal = match verifier.verify(header) {
        Ok(principal) => principal,
        Err(e) => return Err(reject(e, &request)),
    };

    debug!(user_id = principal.user_id, role = %principal.role, "Request authenticated");

    let mut ctx = IdentityContext::new();
    ctx.establish(principal);
    request.extensions_mut().insert(ctx);

    Ok(next.run(request).await)
}

/// 요청 컨텍스트의 역할이 요구 역할과 일치하는지 확인합니다.
///
/// `require_auth` 뒤에서만 의미가 있으며 컨텍스트가 없으면 `MissingPrincipal`.
pub async fn require_role(
    State(required): State<RequiredRole>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let ctx = request
        .extensions()
        .get::<IdentityContext>()
        .cloned()
        .unwrap_or_default();

    if let Err(e) = authorize(&ctx, required.0) {
        return Err(reject(e, &request));
    }

    Ok(next.run(request).await)
}
