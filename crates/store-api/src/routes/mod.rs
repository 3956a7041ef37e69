//! REST API 라우트.
//!
//! # 라우트 그룹
//!
//! - `/health`: 헬스 체크
//! - `/user`: 계정 관리 및 로그인 (공개)
//! - `/protect/user`: 본인 계정 조회 (인증 필요)
//! - `/products`: 상품 조회 (공개)
//! - `/admin/products`: 상품 관리 (인증 + 관리자 역할)

pub mod health;
pub mod products;
pub mod users;

pub use health::{health_router, HealthResponse};
pub use products::{admin_products_router, products_router, ProductRequest};
pub use users::{protected_users_router, users_router, CreateUserRequest, LoginRequest};

use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::services::ServiceError;
use crate::state::AppState;

/// 성공 응답 래퍼: `{"data": ...}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

pub(crate) fn data<T>(value: T) -> Json<DataResponse<T>> {
    Json(DataResponse { data: value })
}

/// 요청 본문 검증. 실패한 규칙의 메시지를 모아 `ServiceError::Validation`으로 반환합니다.
pub(crate) fn validate_request<T: Validate>(request: &T) -> Result<(), ServiceError> {
    if let Err(errors) = request.validate() {
        let mut messages = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{}: 유효하지 않은 값", field))
                })
            })
            .collect::<Vec<_>>();
        messages.sort();
        return Err(ServiceError::Validation(messages.join("; ")));
    }
    Ok(())
}

/// 전체 API 라우터 생성.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/health", health_router())
        .nest("/user", users_router())
        .nest(
            "/protect/user",
            protected_users_router(state.verifier.clone()),
        )
        .nest("/products", products_router())
        .nest(
            "/admin/products",
            admin_products_router(state.verifier.clone()),
        )
        .with_state(state)
}
