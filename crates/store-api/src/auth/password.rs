//! 비밀번호 해싱 유틸리티.
//!
//! Argon2id 기반 자격증명 해싱 및 검증.
//! 해시는 PHC 문자열로 저장되며 알고리즘, 작업 계수, 솔트를 함께 담습니다.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PhcError, PasswordHash, PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use metrics::counter;
use store_core::HashConfig;

/// 비밀번호 처리 에러.
///
/// 두 변형 모두 자격증명 쓰기 경로에서는 해싱 실패로 취급됩니다.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
    #[error("잘못된 해시 형식")]
    InvalidHashFormat,
    #[error("잘못된 해시 파라미터: {0}")]
    InvalidParams(String),
}

/// 자격증명 해셔.
///
/// 시작 시 설정된 작업 계수로 한 번 생성되며 이후 읽기 전용으로 공유됩니다.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self.argon2.params();
        f.debug_struct("CredentialHasher")
            .field("m_cost", &params.m_cost())
            .field("t_cost", &params.t_cost())
            .field("p_cost", &params.p_cost())
            .finish()
    }
}

impl CredentialHasher {
    /// 작업 계수로 해셔를 생성합니다.
    ///
    /// # Errors
    ///
    /// Argon2 파라미터 범위를 벗어나면 `PasswordError::InvalidParams`.
    pub fn new(config: &HashConfig) -> Result<Self, PasswordError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// 평문 비밀번호를 해싱합니다.
    ///
    /// 호출마다 새로운 솔트를 생성하므로 같은 입력이라도 결과가 다릅니다.
    ///
    /// ```rust,ignore
    /// let hash = hasher.hash("my_secure_password")?;
    /// // "$argon2id$v=19$m=19456,t=2,p=1$..."
    /// ```
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|_| PasswordError::HashingFailed)?;

        counter!("credential_hashes_total").increment(1);
        Ok(hash.to_string())
    }

    /// 저장된 해시와 평문 비밀번호를 비교합니다.
    ///
    /// 검증은 저장된 해시에 담긴 파라미터와 솔트로 수행됩니다.
    /// 불일치는 `Ok(false)`이며, 저장 값을 해석할 수 없거나 작업 계수가
    /// 설정값을 넘으면 계산 없이 `PasswordError::InvalidHashFormat`을 반환합니다.
    pub fn verify(&self, plaintext: &str, stored: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(stored).map_err(|_| PasswordError::InvalidHashFormat)?;
        if !self.accepts(&parsed) {
            return Err(PasswordError::InvalidHashFormat);
        }

        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PhcError::Password) => Ok(false),
            Err(PhcError::Algorithm) | Err(PhcError::Version) => {
                Err(PasswordError::InvalidHashFormat)
            }
            Err(_) => Err(PasswordError::HashingFailed),
        }
    }

    /// 값이 이 해셔가 받아들이는 Argon2 PHC 해시인지 확인합니다.
    ///
    /// 솔트와 출력이 모두 있고 m/t/p 계수가 설정값 이하여야 합니다.
    /// 조건을 만족하지 않는 값은 평문으로 취급됩니다.
    pub fn is_hashed(&self, value: &str) -> bool {
        PasswordHash::new(value)
            .map(|hash| self.accepts(&hash))
            .unwrap_or(false)
    }

    fn accepts(&self, hash: &PasswordHash<'_>) -> bool {
        if !matches!(hash.algorithm.as_str(), "argon2id" | "argon2i" | "argon2d") {
            return false;
        }
        if hash.salt.is_none() || hash.hash.is_none() {
            return false;
        }
        let Ok(params) = Params::try_from(hash) else {
            return false;
        };

        let limit = self.argon2.params();
        params.m_cost() <= limit.m_cost()
            && params.t_cost() <= limit.t_cost()
            && params.p_cost() <= limit.p_cost()
    }
}
