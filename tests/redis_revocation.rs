//! Redis 폐기 저장소 통합 테스트
//!
//! 실행 중인 Redis 인스턴스가 필요합니다.
//! 실행: cargo test --test redis_revocation -- --ignored

use std::time::Duration;

use blog_auth_service::caching::redis::RedisClient;
use blog_auth_service::config::RedisConfig;
use blog_auth_service::repositories::tokens::{
    REVOKED_SENTINEL, RedisRevocationStore, RevocationStore,
};

async fn connect() -> RedisClient {
    let config = RedisConfig {
        url: std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        timeout: Duration::from_millis(500),
    };
    RedisClient::connect(&config).await.expect("Failed to connect to Redis")
}

#[tokio::test]
#[ignore] // Redis 서버 필요
async fn test_revoke_writes_sentinel_with_ttl() {
    let redis = connect().await;
    let store = RedisRevocationStore::new(redis.clone());
    let token = format!("test:revocation:{}", uuid::Uuid::new_v4());

    assert!(!store.is_revoked(&token).await.unwrap());

    store.revoke(&token, Duration::from_secs(60)).await.unwrap();

    assert!(store.is_revoked(&token).await.unwrap());
    assert_eq!(
        redis.get_string(&token).await.unwrap(),
        Some(REVOKED_SENTINEL.to_string())
    );
}

#[tokio::test]
#[ignore] // Redis 서버 필요
async fn test_revocation_expires_with_ttl() {
    let redis = connect().await;
    let store = RedisRevocationStore::new(redis);
    let token = format!("test:revocation:{}", uuid::Uuid::new_v4());

    store.revoke(&token, Duration::from_millis(200)).await.unwrap();
    assert!(store.is_revoked(&token).await.unwrap());

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(!store.is_revoked(&token).await.unwrap());
}
