//! 인증/인가 에러.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::ApiErrorResponse;

/// 인증 및 인가 실패 사유.
///
/// 모든 변형은 현재 요청에 대해 종료 처리됩니다 (재시도 없음).
/// 응답 메시지는 일반화되어 있으며 어떤 클레임이 실패했는지 노출하지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization 헤더가 없습니다")]
    MissingCredential,
    #[error("잘못된 Authorization 헤더 형식")]
    MalformedCredential,
    #[error("토큰 서명 또는 알고리즘이 유효하지 않습니다")]
    InvalidSignature,
    #[error("토큰 클레임이 유효하지 않습니다")]
    InvalidClaims,
    #[error("토큰이 만료되었습니다")]
    Expired,
    #[error("요청에 인증된 사용자 정보가 없습니다")]
    MissingPrincipal,
    #[error("권한이 부족합니다")]
    Forbidden,
}

impl AuthError {
    /// 메트릭/로그용 사유 라벨.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::MalformedCredential => "malformed_credential",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::InvalidClaims => "invalid_claims",
            AuthError::Expired => "expired",
            AuthError::MissingPrincipal => "missing_principal",
            AuthError::Forbidden => "forbidden",
        }
    }

    /// HTTP 상태 코드.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::InvalidClaims | AuthError::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn public_code_and_message(&self) -> (&'static str, &'static str) {
        match self {
            AuthError::MissingCredential => ("MISSING_CREDENTIAL", "authentication required"),
            AuthError::MalformedCredential => {
                ("MALFORMED_CREDENTIAL", "invalid authorization header")
            }
            AuthError::InvalidSignature | AuthError::InvalidClaims | AuthError::Expired => {
                ("INVALID_TOKEN", "invalid or expired token")
            }
            AuthError::MissingPrincipal => ("MISSING_PRINCIPAL", "authentication required"),
            AuthError::Forbidden => ("FORBIDDEN", "insufficient permissions"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (code, message) = self.public_code_and_message();
        ApiErrorResponse::simple(code, message).into_response_with(self.status())
    }
}
