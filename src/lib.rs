//! 블로그 인증 서비스 백엔드
//!
//! 용도별 JWT 세션, Redis 기반 토큰 폐기 목록, 라우트별 접근 게이트를 갖춘
//! 블로그(사용자/게시글/댓글) REST API 서비스입니다.
//!
//! # Features
//!
//! - **세션 인증**: HMAC-SHA256 JWT, 세션/이메일 인증/비밀번호 재설정 용도 분리
//! - **로그아웃**: 남은 수명만큼 Redis에 토큰을 폐기 기록
//! - **접근 게이트**: `RequireLogin`(401), `GuestOnly`(403)
//! - **MongoDB**: 사용자, 게시글, 댓글 영구 저장
//! - **메모리 저장소**: 외부 의존성 없는 로컬 실행과 테스트
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + AccessGate
//! └─────────────────┘
//!          │  SessionMiddleware (Identity 판별)
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (AppContext로 조립)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use blog_auth_service::config::AppConfig;
//! use blog_auth_service::core::AppContext;
//!
//! let config = AppConfig::from_env()?;
//! let context = AppContext::from_config(&config).await?;
//! let token = context.users.login("alice", "Secret123").await?;
//! ```

pub mod caching;
pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
