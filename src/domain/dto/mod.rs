//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 주고받는 요청/응답 구조체를 정의합니다.
//! 엔티티와 분리하여 비밀번호 digest, salt 같은 내부 필드가 응답에 섞이지 않도록 합니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! ├── users/       # 회원가입, 로그인, 이메일 인증, 비밀번호 재설정
//! ├── posts.rs     # 게시글 요청/응답
//! ├── comments.rs  # 댓글 요청/응답
//! └── common.rs    # 공통 응답 (메시지)
//! ```
//!
//! JSON 필드는 camelCase를 사용합니다.

pub mod comments;
pub mod common;
pub mod posts;
pub mod users;
