//! 데이터 저장소 연결 설정
//!
//! MongoDB와 Redis 연결 정보를 관리합니다. 두 외부 의존성 모두
//! 요청 파이프라인이 무한정 대기하지 않도록 타임아웃을 필수로 가집니다.

use std::time::Duration;

/// MongoDB 연결 설정
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `MONGODB_URI`
    pub uri: String,
    /// `DATABASE_NAME`
    pub name: String,
    /// 연결 및 서버 선택 타임아웃 (`DATABASE_TIMEOUT_MS`)
    pub timeout: Duration,
}

/// Redis 연결 설정
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// `REDIS_URL`
    pub url: String,
    /// 명령 단위 타임아웃 (`REDIS_TIMEOUT_MS`)
    pub timeout: Duration,
}
