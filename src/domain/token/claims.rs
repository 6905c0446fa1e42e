//! 용도별 JWT 클레임 구조체
//!
//! 모든 토큰은 `purpose` 필드를 판별자로 갖는 [`ClaimSet`] 하나로 인코딩됩니다.
//! 용도마다 주체 필드가 다르기 때문에(세션: `sub`, 이메일 인증/비밀번호 재설정: `email`)
//! 한 용도의 토큰을 다른 용도의 검증기에 넣으면 역직렬화 단계에서 거부됩니다.
//! 용도에 없는 필드가 섞여 있어도 거부합니다.
//!
//! ## Payload 예시
//!
//! ```json
//! { "purpose": "session", "sub": "6f1c...", "iat": 1700000000, "exp": 1700000900 }
//! { "purpose": "password_reset", "email": "alice@x.com", "iat": 1700000000, "exp": 1700003600 }
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 세션 토큰 클레임
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionClaims {
    /// 토큰의 주체 (사용자 ID)
    pub sub: Uuid,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

/// 이메일 기반 토큰 클레임 (이메일 인증, 비밀번호 재설정)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmailClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// 토큰 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPurpose {
    Session,
    EmailVerification,
    PasswordReset,
}

/// 서명되는 클레임 전체
///
/// 각 variant는 만료 시각 하나와 용도별 주체 필드 하나를 정확히 가집니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "purpose", rename_all = "snake_case")]
pub enum ClaimSet {
    Session(SessionClaims),
    EmailVerification(EmailClaims),
    PasswordReset(EmailClaims),
}

impl ClaimSet {
    pub fn purpose(&self) -> TokenPurpose {
        match self {
            ClaimSet::Session(_) => TokenPurpose::Session,
            ClaimSet::EmailVerification(_) => TokenPurpose::EmailVerification,
            ClaimSet::PasswordReset(_) => TokenPurpose::PasswordReset,
        }
    }

    /// 만료 시각 (Unix timestamp)
    pub fn expires_at(&self) -> i64 {
        match self {
            ClaimSet::Session(claims) => claims.exp,
            ClaimSet::EmailVerification(claims) | ClaimSet::PasswordReset(claims) => claims.exp,
        }
    }

    pub fn issued_at(&self) -> i64 {
        match self {
            ClaimSet::Session(claims) => claims.iat,
            ClaimSet::EmailVerification(claims) | ClaimSet::PasswordReset(claims) => claims.iat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_claims_wire_shape() {
        let id = Uuid::new_v4();
        let claims = ClaimSet::Session(SessionClaims { sub: id, iat: 10, exp: 20 });
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["purpose"], "session");
        assert_eq!(value["sub"], id.to_string());
        assert_eq!(value["exp"], 20);
        assert!(value.get("email").is_none());
    }

    #[test]
    fn test_reset_claims_wire_shape() {
        let claims = ClaimSet::PasswordReset(EmailClaims {
            email: "alice@x.com".to_string(),
            iat: 10,
            exp: 20,
        });
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["purpose"], "password_reset");
        assert_eq!(value["email"], "alice@x.com");
        assert!(value.get("sub").is_none());
    }

    #[test]
    fn test_missing_subject_is_rejected() {
        let raw = serde_json::json!({ "purpose": "session", "iat": 1, "exp": 2 });
        assert!(serde_json::from_value::<ClaimSet>(raw).is_err());
    }

    #[test]
    fn test_extra_subject_field_is_rejected() {
        let raw = serde_json::json!({
            "purpose": "session",
            "sub": Uuid::new_v4().to_string(),
            "email": "x@y.z",
            "iat": 1,
            "exp": 2
        });
        assert!(serde_json::from_value::<ClaimSet>(raw).is_err());

        let raw = serde_json::json!({
            "purpose": "password_reset",
            "email": "x@y.z",
            "sub": Uuid::new_v4().to_string(),
            "iat": 1,
            "exp": 2
        });
        assert!(serde_json::from_value::<ClaimSet>(raw).is_err());
    }

    #[test]
    fn test_missing_purpose_is_rejected() {
        let raw = serde_json::json!({ "user_id": Uuid::new_v4().to_string(), "exp": 2 });
        assert!(serde_json::from_value::<ClaimSet>(raw).is_err());
    }

    #[test]
    fn test_expires_at_per_variant() {
        let claims = ClaimSet::EmailVerification(EmailClaims {
            email: "a@b.c".to_string(),
            iat: 1,
            exp: 99,
        });
        assert_eq!(claims.expires_at(), 99);
        assert_eq!(claims.issued_at(), 1);
        assert_eq!(claims.purpose(), TokenPurpose::EmailVerification);
    }
}
