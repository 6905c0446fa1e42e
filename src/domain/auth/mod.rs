//! 요청 단위 인증 정보

pub mod identity;

pub use identity::Identity;
