//! 애플리케이션 상태 관리.
//!
//! 모든 핸들러가 공유하는 상태를 정의합니다.
//! 서명 키와 해시 작업 계수는 생성 시 한 번 주입되며 이후 변경되지 않습니다.

use std::sync::Arc;

use sqlx::PgPool;
use store_core::AuthConfig;

use crate::auth::{CredentialHasher, PasswordError, TokenIssuer, TokenVerifier};
use crate::repository::{ProductStore, UserStore};
use crate::services::{AccountService, ProductService};

/// API 서버 공유 상태.
///
/// `Arc<AppState>`로 감싸 핸들러 간에 공유됩니다. 내부 구성 요소는 모두 읽기 전용입니다.
pub struct AppState {
    /// 계정 서비스
    pub accounts: Arc<AccountService>,

    /// 상품 서비스
    pub products: Arc<ProductService>,

    /// 토큰 검증기 (인증 미들웨어 상태)
    pub verifier: Arc<TokenVerifier>,

    /// 데이터베이스 연결 풀 (헬스 체크용, 선택적)
    pub db_pool: Option<PgPool>,

    /// 서버 시작 시간
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    ///
    /// # Errors
    ///
    /// 해시 작업 계수가 유효하지 않으면 `PasswordError::InvalidParams`.
    pub fn new(
        auth: &AuthConfig,
        users: Arc<dyn UserStore>,
        products: Arc<dyn ProductStore>,
    ) -> Result<Self, PasswordError> {
        let hasher = CredentialHasher::new(&auth.hash)?;
        let issuer = TokenIssuer::new(auth.secret_bytes(), auth.token_ttl_minutes);

        Ok(Self {
            accounts: Arc::new(AccountService::new(users, hasher, issuer)),
            products: Arc::new(ProductService::new(products)),
            verifier: Arc::new(TokenVerifier::new(auth.secret_bytes())),
            db_pool: None,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    /// 데이터베이스 연결 풀 설정.
    pub fn with_db_pool(mut self, pool: PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// 서버 업타임(초) 반환.
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }

    /// 데이터베이스 연결 상태 확인.
    pub async fn is_db_healthy(&self) -> bool {
        if let Some(pool) = &self.db_pool {
            sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
        } else {
            false
        }
    }
}

/// 테스트용 서명 키.
#[cfg(any(test, feature = "test-utils"))]
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-store-api-testing-only";

/// 테스트용 AppState 생성.
///
/// 메모리 저장소와 최소 해시 비용을 사용합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use crate::repository::{MemoryProductStore, MemoryUserStore};
    use store_core::HashConfig;

    let auth = AuthConfig::new(TEST_JWT_SECRET).with_hash(HashConfig::minimal());
    AppState::new(
        &auth,
        Arc::new(MemoryUserStore::new()),
        Arc::new(MemoryProductStore::new()),
    )
    .expect("Failed to create AppState for test")
}
