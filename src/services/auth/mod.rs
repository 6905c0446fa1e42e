//! 인증 및 세션 서비스 모듈
//!
//! 용도별 JWT 발급/검증과 요청 단위 세션 판별, 로그아웃(토큰 폐기)을 담당합니다.
//!
//! # Features
//!
//! - 세션/이메일 인증/비밀번호 재설정 토큰 발급 및 검증
//! - `Authorization: Bearer <token>` 헤더 기반 세션 판별
//! - 로그아웃 시 남은 수명만큼 토큰 폐기
//!
//! # Security
//!
//! - HMAC-SHA256 서명, 다른 알고리즘 거부
//! - 만료 시각 leeway 없음
//! - 용도별로 서로 다른 클레임 형태
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{SessionService, TokenService};
//!
//! let token = token_service.issue_session_token(user.id)?;
//! let resolution = session_service.resolve(Some(&format!("Bearer {}", token))).await;
//! session_service.logout(Some(&format!("Bearer {}", token))).await?;
//! ```

pub mod session_service;
pub mod token_service;

pub use session_service::*;
pub use token_service::*;
