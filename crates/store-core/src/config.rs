//! 설정 관리.
//!
//! 애플리케이션 설정을 정의하고 파일/환경 변수에서 로드합니다.
//!
//! 우선순위 (낮음 → 높음):
//! 1. 내장 기본값
//! 2. TOML 설정 파일 (없어도 됨)
//! 3. `STORE__<SECTION>__<KEY>` 환경 변수
//! 4. 레거시 환경 변수 `DATABASE_URL`, `JWT_KEY`

use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::StoreError;

/// 권장 최소 서명 키 길이 (바이트).
pub const RECOMMENDED_SECRET_LEN: usize = 32;

/// 토큰 유효 시간 상한 (분, 30일).
pub const MAX_TOKEN_TTL_MINUTES: i64 = 30 * 24 * 60;

/// 애플리케이션 설정.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 데이터베이스 설정
    #[serde(default)]
    pub database: DatabaseConfig,
    /// 인증 설정
    pub auth: AuthConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// CORS 허용 origin 목록 (비어 있으면 모든 origin 허용)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL 연결 URL. 없으면 메모리 저장소를 사용합니다.
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 획득 타임아웃 (초)
    pub connection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            connection_timeout_secs: 10,
        }
    }
}

/// 인증 설정.
///
/// 서명 키와 해시 작업 계수는 프로세스 시작 시 한 번 로드되며 이후 변경되지 않습니다.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// HS256 서명 키
    #[serde(deserialize_with = "deserialize_secret")]
    pub jwt_secret: SecretString,
    /// 발급 토큰 유효 시간 (분)
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: i64,
    /// 비밀번호 해시 작업 계수
    #[serde(default)]
    pub hash: HashConfig,
}

fn default_token_ttl() -> i64 {
    60
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(SecretString::new(raw.into_boxed_str()))
}

impl AuthConfig {
    /// 주어진 비밀 키로 설정을 생성합니다 (나머지는 기본값).
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: SecretString::new(jwt_secret.into().into_boxed_str()),
            token_ttl_minutes: default_token_ttl(),
            hash: HashConfig::default(),
        }
    }

    /// 토큰 유효 시간을 설정합니다.
    pub fn with_token_ttl(mut self, minutes: i64) -> Self {
        self.token_ttl_minutes = minutes;
        self
    }

    /// 해시 작업 계수를 설정합니다.
    pub fn with_hash(mut self, hash: HashConfig) -> Self {
        self.hash = hash;
        self
    }

    /// 서명 키 바이트.
    pub fn secret_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }

    /// 설정 값 검증.
    ///
    /// 빈 서명 키와 `1..=MAX_TOKEN_TTL_MINUTES` 범위 밖의 토큰 유효 시간은 거부합니다.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.secret_bytes().is_empty() {
            return Err(StoreError::Config("auth.jwt_secret is empty".to_string()));
        }
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&self.token_ttl_minutes) {
            return Err(StoreError::Config(format!(
                "auth.token_ttl_minutes must be between 1 and {}",
                MAX_TOKEN_TTL_MINUTES
            )));
        }
        if self.secret_bytes().len() < RECOMMENDED_SECRET_LEN {
            tracing::warn!(
                length = self.secret_bytes().len(),
                recommended = RECOMMENDED_SECRET_LEN,
                "JWT signing key is shorter than recommended"
            );
        }
        Ok(())
    }
}

/// Argon2id 작업 계수.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HashConfig {
    /// 메모리 비용 (KiB)
    pub memory_kib: u32,
    /// 반복 횟수
    pub iterations: u32,
    /// 병렬도
    pub parallelism: u32,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl HashConfig {
    /// 테스트용 최소 비용 설정.
    pub fn minimal() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 설정 파일이 없어도 되지만 `auth.jwt_secret`은 반드시 어딘가에서 제공되어야 합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let builder = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("STORE")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("auth.jwt_secret", std::env::var("JWT_KEY").ok())?;

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.auth.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, StoreError> {
        Self::load("config/default.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_rejects_empty_secret() {
        let auth = AuthConfig::new("");
        assert!(matches!(auth.validate(), Err(StoreError::Config(_))));
    }

    #[test]
    fn test_auth_config_rejects_non_positive_ttl() {
        let auth = AuthConfig::new("a-secret-that-is-long-enough-for-hs256!!").with_token_ttl(0);
        assert!(auth.validate().is_err());
    }

    #[test]
    fn test_auth_config_ttl_upper_bound() {
        let secret = "a-secret-that-is-long-enough-for-hs256!!";
        assert!(AuthConfig::new(secret)
            .with_token_ttl(MAX_TOKEN_TTL_MINUTES)
            .validate()
            .is_ok());
        assert!(matches!(
            AuthConfig::new(secret)
                .with_token_ttl(MAX_TOKEN_TTL_MINUTES + 1)
                .validate(),
            Err(StoreError::Config(_))
        ));
        assert!(AuthConfig::new(secret)
            .with_token_ttl(i64::MAX)
            .validate()
            .is_err());
    }

    #[test]
    fn test_auth_config_accepts_short_secret_with_warning() {
        let auth = AuthConfig::new("short");
        assert!(auth.validate().is_ok());
        assert_eq!(auth.secret_bytes(), b"short");
    }

    #[test]
    fn test_secret_is_redacted_in_debug() {
        let auth = AuthConfig::new("super-secret-value");
        let debug = format!("{:?}", auth);
        assert!(!debug.contains("super-secret-value"));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let raw = r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [auth]
            jwt_secret = "from-file"
            token_ttl_minutes = 15

            [auth.hash]
            memory_kib = 8
            iterations = 1
            parallelism = 1
        "#;

        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.auth.token_ttl_minutes, 15);
        assert_eq!(config.auth.hash, HashConfig::minimal());
        assert_eq!(config.auth.secret_bytes(), b"from-file");
        assert!(config.database.url.is_none());
        assert_eq!(config.logging.level, "info");
    }
}
