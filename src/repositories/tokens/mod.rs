//! 토큰 폐기 목록 리포지토리 모듈
//!
//! 로그아웃된 세션 토큰을 만료 시각까지 기억하는 저장소입니다.
//!
//! # Features
//!
//! - **Redis 구현**: 키 = 토큰 문자열, 값 = `"1"`, `SETEX` TTL = 남은 유효 시간(초, 올림)
//! - **메모리 구현**: 같은 계약을 프로세스 내에서 제공 (지연 만료)
//! - **멱등성**: 같은 토큰을 다시 폐기해도 에러 없이 TTL만 갱신
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::repositories::tokens::RevocationStore;
//!
//! store.revoke(&token, Duration::from_secs(600)).await?;
//! assert!(store.is_revoked(&token).await?);
//! ```

pub mod revocation_repository;

pub use revocation_repository::*;
