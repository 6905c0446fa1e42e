//! 도메인 계층
//!
//! 엔티티, 토큰 클레임, 요청 단위 인증 정보, HTTP DTO를 정의합니다.

pub mod auth;
pub mod dto;
pub mod entities;
pub mod token;
