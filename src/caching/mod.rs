//! 캐싱 계층 모듈
//!
//! Redis 연결을 관리합니다. 현재 Redis는 세션 토큰 폐기 목록 저장소로 사용됩니다.
//!
//! # 주요 기능
//!
//! - `ConnectionManager` 기반 멀티플렉싱 연결 (끊기면 자동 재연결)
//! - 명령 단위 타임아웃 (`REDIS_TIMEOUT_MS`)
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let redis = RedisClient::connect(&config.redis).await?;
//! redis.set_ex("some-key", "1", 900).await?;
//! let value = redis.get_string("some-key").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! REDIS_TIMEOUT_MS=500              # 기본값
//! ```

pub mod redis;
