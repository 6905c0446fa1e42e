//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 각 서비스는 저장소와 다른 서비스를 생성자로 주입받으며,
//! `core::AppContext`가 애플리케이션 시작 시 한 번 조립합니다.
//!
//! # Features
//!
//! - 용도별 JWT 발급/검증, 세션 판별, 로그아웃
//! - 사용자 등록, 로그인, 이메일 인증, 비밀번호 재설정
//! - 게시글/댓글 CRUD (작성자 권한 확인)
//! - 인증/재설정 메일 발송
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::core::AppContext;
//!
//! let context = AppContext::in_memory(&config);
//! let token = context.users.login("alice", "Secret123").await?;
//! ```

pub mod auth;
pub mod comments;
pub mod notifications;
pub mod posts;
pub mod users;
