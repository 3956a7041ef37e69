//! 상품 모델.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 저장된 상품.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// 상품 생성/수정 입력.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
}

impl NewProduct {
    /// 필수 필드 검증.
    ///
    /// 이름/설명은 비어 있으면 안 되고, 가격과 수량은 양수여야 합니다.
    /// 위반한 첫 번째 규칙을 에러 메시지로 반환합니다.
    pub fn check(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("product name is empty");
        }
        if self.description.trim().is_empty() {
            return Err("product description is empty");
        }
        if self.price <= Decimal::ZERO {
            return Err("product price must be positive");
        }
        if self.quantity <= 0 {
            return Err("product quantity must be positive");
        }
        Ok(())
    }
}
