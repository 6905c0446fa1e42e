//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 인증 관련 미들웨어를 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 1. 세션 미들웨어 (SessionMiddleware)
//! - 앱 전체에 한 번 등록
//! - `Authorization: Bearer <token>` 판별 (폐기 목록 확인 → 서명/만료 검증)
//! - 인증된 요청에만 `Identity`를 request extension에 저장
//! - 판별 실패는 거부하지 않고 익명으로 진행
//!
//! ### 2. 접근 게이트 (AccessGate)
//! - 라우트 단위로 등록
//! - `require_login()`: 익명 요청 401
//! - `guest_only()`: 인증된 요청 403
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::{AccessGate, SessionMiddleware};
//!
//! App::new()
//!     .wrap(SessionMiddleware::new(sessions))
//!     .service(
//!         web::resource("/api/v1/users/me")
//!             .wrap(AccessGate::require_login())
//!             .route(web::get().to(me)),
//!     )
//! ```

pub mod access_gate;
pub mod session_middleware;
mod session_inner;

pub use access_gate::AccessGate;
pub use session_middleware::SessionMiddleware;
