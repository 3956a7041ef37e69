//! JWT 토큰 처리.
//!
//! HS256 단일 키로 Access Token을 발급하고 검증합니다.

use chrono::Utc;
use jsonwebtoken::{
    decode, decode_header, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AuthError, Principal};

/// 허용되는 유일한 서명 알고리즘.
const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Authorization 헤더 스킴.
const BEARER_SCHEME: &str = "Bearer";

/// JWT Access Token 페이로드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// 사용자 ID
    pub user_id: i64,
    /// 사용자 역할
    pub role: String,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// 주어진 시각 기준으로 만료 여부를 확인합니다. `exp == now`는 유효합니다.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp < now
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.role.clone())
    }
}

/// 토큰 발급 응답.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub access_token: String,
    /// 토큰 타입 (항상 "Bearer")
    pub token_type: String,
    /// 만료까지 남은 시간 (초)
    pub expires_in: i64,
}

/// JWT 토큰 발급 에러.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("토큰 인코딩 실패: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// Authorization 헤더에서 Bearer 토큰을 추출합니다.
///
/// 정확히 공백 하나로 구분된 두 부분이어야 하며 첫 부분은 `Bearer`입니다.
fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = match header {
        Some(h) if !h.is_empty() => h,
        _ => return Err(AuthError::MissingCredential),
    };

    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER_SCHEME), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedCredential),
    }
}

/// 토큰 검증기.
///
/// 시작 시 서명 키로 한 번 생성되며 모든 요청에서 공유됩니다.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithm", &SIGNING_ALGORITHM)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    pub fn new(secret: &[u8]) -> Self {
        // 만료는 주입된 시각으로 직접 검사하므로 라이브러리 검증은 끈다
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// 현재 시각 기준으로 Authorization 헤더를 검증합니다.
    pub fn verify(&self, header: Option<&str>) -> Result<Principal, AuthError> {
        self.verify_at(header, Utc::now().timestamp())
    }

    /// 주어진 시각 기준으로 Authorization 헤더를 검증합니다.
    ///
    /// 검사 순서: 헤더 존재 → Bearer 형식 → 알고리즘/서명 → 클레임 형태 → 만료.
    pub fn verify_at(&self, header: Option<&str>, now: i64) -> Result<Principal, AuthError> {
        let token = bearer_token(header)?;

        let jwt_header = decode_header(token).map_err(|_| AuthError::InvalidSignature)?;
        if jwt_header.alg != SIGNING_ALGORITHM {
            return Err(AuthError::InvalidSignature);
        }

        let payload = decode::<Value>(token, &self.key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::Json(_) => AuthError::InvalidClaims,
                _ => AuthError::InvalidSignature,
            })?
            .claims;

        let claims: Claims =
            serde_json::from_value(payload).map_err(|_| AuthError::InvalidClaims)?;

        if claims.is_expired_at(now) {
            return Err(AuthError::Expired);
        }

        Ok(claims.principal())
    }
}

/// 토큰 발급기.
pub struct TokenIssuer {
    key: EncodingKey,
    ttl_secs: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// # Arguments
    ///
    /// * `secret` - 검증기와 같은 서명 키
    /// * `ttl_minutes` - 토큰 유효 시간 (분)
    pub fn new(secret: &[u8], ttl_minutes: i64) -> Self {
        Self {
            key: EncodingKey::from_secret(secret),
            ttl_secs: ttl_minutes.saturating_mul(60),
        }
    }

    pub fn issue(&self, principal: &Principal) -> Result<IssuedToken, TokenError> {
        self.issue_at(principal, Utc::now().timestamp())
    }

    pub fn issue_at(&self, principal: &Principal, now: i64) -> Result<IssuedToken, TokenError> {
        let claims = Claims {
            user_id: principal.user_id,
            role: principal.role.clone(),
            exp: now.saturating_add(self.ttl_secs),
            iat: Some(now),
        };

        let access_token = encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.key)?;

        Ok(IssuedToken {
            access_token,
            token_type: BEARER_SCHEME.to_string(),
            expires_in: self.ttl_secs,
        })
    }
}
