//! 스토어 백엔드 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (계정, 상품)
//! - JWT 인증 및 역할 기반 접근 제어
//! - 헬스 체크 엔드포인트
//! - Prometheus 메트릭
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: 자격증명 해싱, 토큰 검증, 역할 게이트
//! - [`services`]: 계정/상품 비즈니스 로직
//! - [`repository`]: PostgreSQL 및 메모리 저장소
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어

pub mod auth;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use auth::{AuthError, Authenticated, IdentityContext, Principal};
pub use error::ApiErrorResponse;
pub use metrics::setup_metrics_recorder;
pub use middleware::metrics_layer;
pub use routes::create_router;
pub use services::{AccountService, ProductService, ServiceError};
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::{create_test_state, TEST_JWT_SECRET};
