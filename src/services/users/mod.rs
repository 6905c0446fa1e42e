//! 사용자 관리 서비스 모듈
//!
//! 사용자 생명주기와 관련된 비즈니스 로직을 담당합니다.
//!
//! # Features
//!
//! - 회원가입 (사용자명/이메일 중복 방지)
//! - 로그인 및 세션 토큰 발급
//! - 이메일 인증, 인증 메일 재발송
//! - 비밀번호 재설정
//!
//! # Security
//!
//! - 사용자별 salt + SHA-256 digest, 상수 시간 비교
//! - 사용자 열거를 막는 단일 로그인 실패 메시지
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user = user_service.register(request).await?;
//! let token = user_service.login("alice", "Secret123").await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
