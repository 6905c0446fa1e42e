//! 토큰 클레임 모델

pub mod claims;

pub use claims::{ClaimSet, EmailClaims, SessionClaims, TokenPurpose};
