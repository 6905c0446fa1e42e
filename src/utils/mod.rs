//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`password`] - salt 생성, 비밀번호 digest 계산 및 비교

pub mod password;
