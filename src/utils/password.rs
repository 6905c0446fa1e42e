//! 비밀번호 해싱 유틸리티
//!
//! 사용자마다 16바이트 랜덤 salt를 만들고 `SHA-256(salt_hex + password)`를
//! hex 문자열로 저장합니다. 비교는 길이와 무관하게 모든 바이트를 확인하는
//! 상수 시간 비교를 사용합니다.
//!
//! ```rust,ignore
//! let salt = generate_salt();
//! let digest = hash_password("Secret123", &salt);
//! assert!(verify_password("Secret123", &salt, &digest));
//! ```

use constant_time_eq::constant_time_eq;
use rand::RngCore;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

/// 16바이트 랜덤 salt (hex 32자)
pub fn generate_salt() -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    hex::encode(salt)
}

/// `SHA-256(salt + password)` hex digest
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// 입력 비밀번호의 digest가 저장된 digest와 같은지 확인합니다.
pub fn verify_password(password: &str, salt: &str, expected_digest: &str) -> bool {
    constant_time_eq(hash_password(password, salt).as_bytes(), expected_digest.as_bytes())
}
