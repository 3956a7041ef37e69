//! 상품 endpoint.
//!
//! 조회는 공개이며, 생성/수정/삭제는 관리자 역할이 필요합니다.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use store_core::{NewProduct, Product};
use validator::{Validate, ValidationError};

use super::{data, validate_request, DataResponse};
use crate::auth::{require_auth, require_role, RequiredRole, TokenVerifier};
use crate::services::ServiceError;
use crate::state::AppState;

/// 공백만 있는 문자열 거부.
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(
            ValidationError::new("blank").with_message("공백만으로 이루어질 수 없습니다".into())
        );
    }
    Ok(())
}

/// 가격 검증 (0 초과 100억 미만, 소수점 이하 2자리까지).
fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("price_not_positive")
            .with_message("가격은 0보다 커야 합니다".into()));
    }
    if *value >= Decimal::from(10_000_000_000_i64) {
        return Err(ValidationError::new("price_too_large")
            .with_message("가격은 100억 미만이어야 합니다".into()));
    }
    if value.normalize().scale() > 2 {
        return Err(ValidationError::new("price_scale")
            .with_message("가격은 소수점 이하 2자리까지 가능합니다".into()));
    }
    Ok(())
}

/// 상품 생성/수정 요청.
#[derive(Debug, Deserialize, Validate)]
pub struct ProductRequest {
    #[validate(
        length(min = 1, max = 200, message = "상품명은 1-200자여야 합니다"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[validate(
        length(min = 1, max = 2000, message = "설명은 1-2000자여야 합니다"),
        custom(function = "validate_not_blank")
    )]
    pub description: String,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(range(min = 1, message = "수량은 1 이상이어야 합니다"))]
    pub quantity: i32,
}

impl From<ProductRequest> for NewProduct {
    fn from(req: ProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
            quantity: req.quantity,
        }
    }
}

/// GET /products
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<Product>>>, ServiceError> {
    Ok(data(state.products.list().await?))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<DataResponse<Product>>, ServiceError> {
    Ok(data(state.products.get_by_id(id).await?))
}

/// POST /admin/products
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProductRequest>,
) -> Result<(StatusCode, Json<DataResponse<Product>>), ServiceError> {
    validate_request(&request)?;
    let created = state.products.create(request.into()).await?;
    Ok((StatusCode::CREATED, data(created)))
}

/// PUT /admin/products/{id}
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<ProductRequest>,
) -> Result<Json<DataResponse<Product>>, ServiceError> {
    validate_request(&request)?;
    Ok(data(state.products.update(id, request.into()).await?))
}

/// DELETE /admin/products/{id}
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServiceError> {
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 공개 상품 라우터.
pub fn products_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
}

/// 관리자 상품 라우터.
///
/// 인증 미들웨어가 먼저 실행되고 역할 게이트가 뒤따릅니다.
pub fn admin_products_router(verifier: Arc<TokenVerifier>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_product))
        .route("/{id}", put(update_product).delete(delete_product))
        .route_layer(middleware::from_fn_with_state(
            RequiredRole::admin(),
            require_role,
        ))
        .route_layer(middleware::from_fn_with_state(verifier, require_auth))
}
