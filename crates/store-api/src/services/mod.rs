//! 비즈니스 서비스 계층.
//!
//! 핸들러는 서비스만 호출하고, 서비스는 저장소 트레이트에만 의존합니다.

mod accounts;
mod products;

pub use accounts::AccountService;
pub use products::ProductService;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use store_core::StoreError;

use crate::auth::{PasswordError, TokenError};
use crate::error::ApiErrorResponse;

/// 서비스 계층 에러.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("입력 검증 실패: {0}")]
    Validation(String),

    #[error("중복: {0}")]
    Conflict(String),

    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    #[error("이메일 또는 비밀번호가 올바르지 않습니다")]
    InvalidCredentials,

    #[error("자격증명 해싱 실패")]
    HashingFailure(#[source] PasswordError),

    #[error("토큰 발급 실패")]
    TokenIssuance(#[source] TokenError),

    #[error("저장소 에러")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(what) => ServiceError::Conflict(what),
            StoreError::NotFound(what) => ServiceError::NotFound(what),
            other => ServiceError::Storage(other),
        }
    }
}

impl From<PasswordError> for ServiceError {
    fn from(err: PasswordError) -> Self {
        ServiceError::HashingFailure(err)
    }
}

impl From<TokenError> for ServiceError {
    fn from(err: TokenError) -> Self {
        ServiceError::TokenIssuance(err)
    }
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ServiceError::HashingFailure(_)
            | ServiceError::TokenIssuance(_)
            | ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ServiceError::Validation(msg) => ApiErrorResponse::simple("VALIDATION_ERROR", msg),
            ServiceError::Conflict(msg) => ApiErrorResponse::simple("CONFLICT", msg),
            ServiceError::NotFound(msg) => ApiErrorResponse::simple("NOT_FOUND", msg),
            ServiceError::InvalidCredentials => {
                ApiErrorResponse::simple("INVALID_CREDENTIALS", "invalid email or password")
            }
            ServiceError::HashingFailure(_)
            | ServiceError::TokenIssuance(_)
            | ServiceError::Storage(_) => {
                // 내부 원인은 로그에만 남긴다
                tracing::error!(error = ?self, "Internal error while handling request");
                ApiErrorResponse::new("INTERNAL_ERROR", "internal server error")
            }
        };

        body.into_response_with(status)
    }
}
