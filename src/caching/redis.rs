//! # Redis 클라이언트 구현
//!
//! `redis::aio::ConnectionManager`를 감싸 모든 명령에 타임아웃을 적용합니다.
//! ConnectionManager는 복제 비용이 낮고 내부적으로 하나의 멀티플렉싱 연결을 공유하므로
//! 요청마다 `clone()`해서 사용합니다.
//!
//! ## 연결 관리
//!
//! 연결이 끊기면 ConnectionManager가 다음 명령에서 재연결을 시도합니다.
//! 재연결 중인 명령은 에러 또는 타임아웃으로 끝나며, 호출자가 정책에 따라 처리합니다.

use std::time::Duration;

use log::info;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use thiserror::Error;

use crate::config::RedisConfig;

/// Redis 명령 실패
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("redis command failed: {0}")]
    Redis(#[from] RedisError),

    #[error("redis command timed out after {0:?}")]
    Timeout(Duration),
}

/// Redis 클라이언트 래퍼
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let redis = RedisClient::connect(&RedisConfig {
///     url: "redis://localhost:6379".to_string(),
///     timeout: Duration::from_millis(500),
/// }).await?;
///
/// redis.set_ex("token-string", "1", 600).await?;
/// assert_eq!(redis.get_string("token-string").await?, Some("1".to_string()));
/// ```
#[derive(Clone)]
pub struct RedisClient {
    connection: ConnectionManager,
    timeout: Duration,
}

impl RedisClient {
    /// Redis 서버에 연결하고 PING으로 가용성을 확인합니다.
    ///
    /// ## 에러 케이스
    ///
    /// - 잘못된 URL 형식
    /// - 서버에 연결할 수 없거나 타임아웃 내에 응답하지 않는 경우
    /// - 인증 실패
    pub async fn connect(config: &RedisConfig) -> Result<Self, CacheError> {
        let client = Client::open(config.url.as_str())?;

        let connection = with_timeout(config.timeout, ConnectionManager::new(client)).await?;

        let redis = Self {
            connection,
            timeout: config.timeout,
        };
        redis.ping().await?;

        info!("✅ Redis 연결 성공");
        Ok(redis)
    }

    /// PING
    pub async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.connection.clone();
        self.bounded(async move { redis::cmd("PING").query_async::<()>(&mut conn).await })
            .await
    }

    /// 만료 시간과 함께 문자열 값을 저장합니다 (`SETEX`).
    ///
    /// 같은 키가 있으면 값과 TTL을 모두 덮어씁니다.
    pub async fn set_ex(&self, key: &str, value: &str, seconds: u64) -> Result<(), CacheError> {
        let mut conn = self.connection.clone();
        self.bounded(async move { conn.set_ex::<_, _, ()>(key, value, seconds).await })
            .await
    }

    /// 문자열 값을 조회합니다. 키가 없으면 `Ok(None)`.
    pub async fn get_string(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection.clone();
        self.bounded(async move { conn.get::<_, Option<String>>(key).await })
            .await
    }

    async fn bounded<F, T>(&self, command: F) -> Result<T, CacheError>
    where
        F: Future<Output = Result<T, RedisError>>,
    {
        with_timeout(self.timeout, command).await
    }
}

/// Redis 명령 future를 `timeout` 안에 끝내지 못하면 [`CacheError::Timeout`]으로 바꿉니다.
pub(crate) async fn with_timeout<F, T>(timeout: Duration, command: F) -> Result<T, CacheError>
where
    F: Future<Output = Result<T, RedisError>>,
{
    match tokio::time::timeout(timeout, command).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(CacheError::Timeout(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redis::ErrorKind;

    #[tokio::test(start_paused = true)]
    async fn test_pending_command_times_out() {
        let timeout = Duration::from_millis(500);
        let result: Result<(), CacheError> =
            with_timeout(timeout, std::future::pending::<Result<(), RedisError>>()).await;

        assert!(matches!(result, Err(CacheError::Timeout(t)) if t == timeout));
    }

    #[tokio::test]
    async fn test_completed_command_passes_through() {
        let ok = with_timeout(Duration::from_millis(500), async { Ok::<_, RedisError>("1") }).await;
        assert_eq!(ok.unwrap(), "1");

        let failed = with_timeout(Duration::from_millis(500), async {
            Err::<(), _>(RedisError::from((ErrorKind::IoError, "connection reset")))
        })
        .await;
        assert!(matches!(failed, Err(CacheError::Redis(_))));
    }
}
