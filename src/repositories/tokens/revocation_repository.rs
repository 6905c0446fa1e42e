//! 세션 토큰 폐기 저장소
//!
//! JWT는 서명만으로 검증되므로 만료 전에 무효화하려면 별도의 상태가 필요합니다.
//! 이 모듈은 "이 토큰은 폐기됨"이라는 사실을 토큰의 남은 수명 동안만 기록합니다.
//!
//! ## TTL 규칙
//!
//! 저장 TTL은 남은 수명을 초 단위로 올림한 값입니다. 따라서 폐기 기록은 토큰의
//! 실제 만료보다 먼저 사라지지 않고, 늦어도 1초 안에 함께 사라집니다.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::caching::redis::{CacheError, RedisClient};

/// 폐기 기록에 저장되는 값
pub const REVOKED_SENTINEL: &str = "1";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RevocationError {
    /// 저장소 연결 실패 또는 명령 오류
    #[error("revocation store unavailable: {0}")]
    Unavailable(String),

    /// 저장소 응답 지연
    #[error("revocation store timed out after {0:?}")]
    Timeout(Duration),

    /// 0 이하의 TTL로 폐기를 요청한 경우
    #[error("revocation ttl must be positive")]
    InvalidTtl,
}

impl From<CacheError> for RevocationError {
    fn from(error: CacheError) -> Self {
        match error {
            CacheError::Timeout(after) => RevocationError::Timeout(after),
            CacheError::Redis(e) => RevocationError::Unavailable(e.to_string()),
        }
    }
}

/// 토큰 폐기 목록
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// `token`을 `ttl` 동안 폐기 상태로 기록합니다. 이미 폐기된 토큰이면 TTL만 갱신합니다.
    async fn revoke(&self, token: &str, ttl: Duration) -> Result<(), RevocationError>;

    /// 폐기 여부. 기록이 없으면 에러가 아니라 `Ok(false)`입니다.
    async fn is_revoked(&self, token: &str) -> Result<bool, RevocationError>;
}

/// 남은 수명을 저장소 TTL(초)로 변환합니다. 1초 미만은 올림합니다.
pub fn ttl_seconds(ttl: Duration) -> Result<u64, RevocationError> {
    if ttl.is_zero() {
        return Err(RevocationError::InvalidTtl);
    }
    Ok(ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0))
}

/// Redis 기반 폐기 저장소
#[derive(Clone)]
pub struct RedisRevocationStore {
    redis: RedisClient,
}

impl RedisRevocationStore {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, token: &str, ttl: Duration) -> Result<(), RevocationError> {
        let seconds = ttl_seconds(ttl)?;
        self.redis.set_ex(token, REVOKED_SENTINEL, seconds).await?;
        debug!("토큰 폐기 기록 (TTL {}초)", seconds);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, RevocationError> {
        Ok(self.redis.get_string(token).await?.is_some())
    }
}

/// 프로세스 내 폐기 저장소
///
/// 만료된 기록은 조회 시 무시되고 다음 `revoke` 호출 때 정리됩니다.
/// `tokio::time::Instant`를 사용하므로 테스트에서 시간을 멈추고 진행시킬 수 있습니다.
#[derive(Default)]
pub struct MemoryRevocationStore {
    entries: RwLock<HashMap<String, Instant>>,
}

impl MemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn revoke(&self, token: &str, ttl: Duration) -> Result<(), RevocationError> {
        let seconds = ttl_seconds(ttl)?;
        let now = Instant::now();

        let mut entries = self.entries.write().await;
        entries.retain(|_, deadline| *deadline > now);
        entries.insert(token.to_string(), now + Duration::from_secs(seconds));
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, RevocationError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(token)
            .is_some_and(|deadline| *deadline > Instant::now()))
    }
}

/// 항상 실패하는 저장소 (장애 상황 테스트용)
#[cfg(test)]
pub(crate) struct UnreachableRevocationStore;

#[cfg(test)]
#[async_trait]
impl RevocationStore for UnreachableRevocationStore {
    async fn revoke(&self, _token: &str, _ttl: Duration) -> Result<(), RevocationError> {
        Err(RevocationError::Unavailable("connection refused".to_string()))
    }

    async fn is_revoked(&self, _token: &str) -> Result<bool, RevocationError> {
        Err(RevocationError::Unavailable("connection refused".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_seconds_rounds_up() {
        assert_eq!(ttl_seconds(Duration::from_secs(900)), Ok(900));
        assert_eq!(ttl_seconds(Duration::from_millis(1)), Ok(1));
        assert_eq!(ttl_seconds(Duration::from_millis(1500)), Ok(2));
        assert_eq!(ttl_seconds(Duration::ZERO), Err(RevocationError::InvalidTtl));
    }

    #[test]
    fn test_cache_errors_map_to_revocation_errors() {
        let timeout = Duration::from_millis(500);
        assert_eq!(
            RevocationError::from(CacheError::Timeout(timeout)),
            RevocationError::Timeout(timeout)
        );

        let refused = redis::RedisError::from((redis::ErrorKind::IoError, "connection refused"));
        assert!(matches!(
            RevocationError::from(CacheError::Redis(refused)),
            RevocationError::Unavailable(reason) if reason.contains("connection refused")
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_revoked_until_ttl_elapses() {
        let store = MemoryRevocationStore::new();
        store.revoke("token-a", Duration::from_secs(10)).await.unwrap();

        assert!(store.is_revoked("token-a").await.unwrap());

        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(store.is_revoked("token-a").await.unwrap());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!store.is_revoked("token-a").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subsecond_ttl_is_not_shortened() {
        let store = MemoryRevocationStore::new();
        store.revoke("token-b", Duration::from_millis(200)).await.unwrap();

        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(store.is_revoked("token-b").await.unwrap());

        tokio::time::advance(Duration::from_millis(600)).await;
        assert!(!store.is_revoked("token-b").await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_revoked() {
        let store = MemoryRevocationStore::new();
        assert_eq!(store.is_revoked("never-seen").await, Ok(false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_revoke_is_idempotent() {
        let store = MemoryRevocationStore::new();
        store.revoke("token-c", Duration::from_secs(5)).await.unwrap();
        store.revoke("token-c", Duration::from_secs(5)).await.unwrap();

        assert!(store.is_revoked("token-c").await.unwrap());
    }

    #[tokio::test]
    async fn test_zero_ttl_rejected() {
        let store = MemoryRevocationStore::new();
        let result = store.revoke("token-d", Duration::ZERO).await;
        assert_eq!(result, Err(RevocationError::InvalidTtl));
        assert_eq!(store.is_revoked("token-d").await, Ok(false));
    }
}
