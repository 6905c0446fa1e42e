//! JWT 토큰 관리 서비스 구현
//!
//! 용도별(세션, 이메일 인증, 비밀번호 재설정) 토큰을 발급하고 검증합니다.
//! 서명은 HMAC-SHA256 하나만 허용하며, 헤더의 `alg`가 다르면 서명 검증 전에 거부합니다.
//!
//! 서비스는 생성 시 받은 설정만 보관하고 이후 변경하지 않으므로
//! `Arc<TokenService>` 하나를 모든 워커가 동기화 없이 공유합니다.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::domain::token::{ClaimSet, EmailClaims, SessionClaims};
use crate::errors::AppError;

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;
const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// 서명 불일치, 허용되지 않은 알고리즘, JWT 형식이 아닌 문자열
    #[error("invalid token signature")]
    InvalidSignature,

    /// 서명은 유효하지만 만료 시각이 지남
    #[error("token expired")]
    Expired,

    /// 용도가 다르거나 용도별 주체 필드가 없음
    #[error("malformed token claims")]
    MalformedClaims,

    /// 토큰 생성 실패 (서명 키 설정 오류)
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl From<TokenError> for AppError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Expired => AppError::AuthenticationError("토큰이 만료되었습니다".to_string()),
            TokenError::InvalidSignature | TokenError::MalformedClaims => {
                AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
            }
            TokenError::Signing(detail) => AppError::InternalError(detail),
        }
    }
}

/// JWT 토큰 관리 서비스
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_ttl: Duration,
    verification_ttl: Duration,
    password_reset_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            session_ttl: config.session_ttl,
            verification_ttl: config.verification_ttl,
            password_reset_ttl: config.password_reset_ttl,
        }
    }

    /// 로그인한 사용자를 위한 세션 토큰 생성
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = token_service.issue_session_token(user.id)?;
    /// assert_eq!(token_service.validate_session_token(&token)?, user.id);
    /// ```
    pub fn issue_session_token(&self, user_id: Uuid) -> Result<String, TokenError> {
        let (iat, exp) = window(self.session_ttl);
        self.sign(&ClaimSet::Session(SessionClaims { sub: user_id, iat, exp }))
    }

    /// 이메일 인증 토큰 생성
    pub fn issue_verification_token(&self, email: &str) -> Result<String, TokenError> {
        let (iat, exp) = window(self.verification_ttl);
        self.sign(&ClaimSet::EmailVerification(EmailClaims {
            email: email.to_string(),
            iat,
            exp,
        }))
    }

    /// 비밀번호 재설정 토큰 생성
    pub fn issue_password_reset_token(&self, email: &str) -> Result<String, TokenError> {
        let (iat, exp) = window(self.password_reset_ttl);
        self.sign(&ClaimSet::PasswordReset(EmailClaims {
            email: email.to_string(),
            iat,
            exp,
        }))
    }

    /// 세션 토큰을 검증하고 사용자 ID를 반환합니다.
    ///
    /// # Errors
    ///
    /// * `TokenError::InvalidSignature` - 서명/알고리즘 불일치
    /// * `TokenError::Expired` - 만료됨
    /// * `TokenError::MalformedClaims` - 세션 용도가 아닌 토큰
    pub fn validate_session_token(&self, token: &str) -> Result<Uuid, TokenError> {
        match self.decode(token, true)? {
            ClaimSet::Session(claims) => Ok(claims.sub),
            _ => Err(TokenError::MalformedClaims),
        }
    }

    /// 이메일 인증 토큰을 검증하고 이메일 주소를 반환합니다.
    pub fn validate_verification_token(&self, token: &str) -> Result<String, TokenError> {
        match self.decode(token, true)? {
            ClaimSet::EmailVerification(claims) => Ok(claims.email),
            _ => Err(TokenError::MalformedClaims),
        }
    }

    /// 비밀번호 재설정 토큰을 검증하고 이메일 주소를 반환합니다.
    pub fn validate_password_reset_token(&self, token: &str) -> Result<String, TokenError> {
        match self.decode(token, true)? {
            ClaimSet::PasswordReset(claims) => Ok(claims.email),
            _ => Err(TokenError::MalformedClaims),
        }
    }

    /// 서명과 알고리즘만 검증하고 클레임을 반환합니다.
    ///
    /// 만료된 토큰도 `Ok`를 반환하므로 로그아웃 처리에서 만료 여부를 직접 판단할 수 있습니다.
    pub fn parse_claims(&self, token: &str) -> Result<ClaimSet, TokenError> {
        self.decode(token, false)
    }

    pub(crate) fn sign(&self, claims: &ClaimSet) -> Result<String, TokenError> {
        encode(&Header::new(SIGNING_ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn decode(&self, token: &str, validate_exp: bool) -> Result<ClaimSet, TokenError> {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = validate_exp;

        decode::<ClaimSet>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                    TokenError::MalformedClaims
                }
                _ => TokenError::InvalidSignature,
            })
    }
}

/// (발급 시각, 만료 시각) Unix timestamp
fn window(ttl: Duration) -> (i64, i64) {
    let now = Utc::now().timestamp();
    let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
    (now, now.saturating_add(ttl_secs))
}

/// `Authorization` 헤더 값에서 토큰 부분만 추출합니다.
///
/// `Bearer ` 접두사가 없거나 토큰이 비어 있으면 `None`입니다.
///
/// ```rust,ignore
/// assert_eq!(extract_bearer_token("Bearer abc"), Some("abc"));
/// assert_eq!(extract_bearer_token("Basic abc"), None);
/// ```
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&JwtConfig {
            secret: "test-secret".to_string(),
            session_ttl: Duration::from_secs(15 * 60),
            verification_ttl: Duration::from_secs(24 * 60 * 60),
            password_reset_ttl: Duration::from_secs(60 * 60),
        })
    }

    #[test]
    fn test_session_token_roundtrip() {
        let service = service();
        let user_id = Uuid::new_v4();

        let token = service.issue_session_token(user_id).unwrap();
        assert_eq!(service.validate_session_token(&token), Ok(user_id));
    }

    #[test]
    fn test_session_expiry_uses_configured_ttl() {
        let service = service();
        let token = service.issue_session_token(Uuid::new_v4()).unwrap();

        let claims = service.parse_claims(&token).unwrap();
        assert_eq!(claims.expires_at() - claims.issued_at(), 15 * 60);
    }

    #[test]
    fn test_expired_session_token_rejected() {
        let service = service();
        let now = Utc::now().timestamp();
        let token = service
            .sign(&ClaimSet::Session(SessionClaims {
                sub: Uuid::new_v4(),
                iat: now - 120,
                exp: now - 60,
            }))
            .unwrap();

        assert_eq!(service.validate_session_token(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_parse_claims_accepts_expired_token() {
        let service = service();
        let now = Utc::now().timestamp();
        let token = service
            .sign(&ClaimSet::Session(SessionClaims {
                sub: Uuid::new_v4(),
                iat: now - 120,
                exp: now - 60,
            }))
            .unwrap();

        assert_eq!(service.parse_claims(&token).unwrap().expires_at(), now - 60);
    }

    #[test]
    fn test_reset_token_rejected_as_session() {
        let service = service();
        let token = service.issue_password_reset_token("alice@x.com").unwrap();

        assert_eq!(service.validate_session_token(&token), Err(TokenError::MalformedClaims));
        assert_eq!(
            service.validate_password_reset_token(&token),
            Ok("alice@x.com".to_string())
        );
    }

    #[test]
    fn test_verification_token_not_usable_for_reset() {
        let service = service();
        let token = service.issue_verification_token("alice@x.com").unwrap();

        assert_eq!(
            service.validate_password_reset_token(&token),
            Err(TokenError::MalformedClaims)
        );
        assert_eq!(
            service.validate_verification_token(&token),
            Ok("alice@x.com".to_string())
        );
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let other = TokenService::new(&JwtConfig {
            secret: "another-secret".to_string(),
            session_ttl: Duration::from_secs(60),
            verification_ttl: Duration::from_secs(60),
            password_reset_ttl: Duration::from_secs(60),
        });
        let token = other.issue_session_token(Uuid::new_v4()).unwrap();

        assert_eq!(
            service().validate_session_token(&token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let now = Utc::now().timestamp();
        let claims = ClaimSet::Session(SessionClaims {
            sub: Uuid::new_v4(),
            iat: now,
            exp: now + 600,
        });
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(
            service().validate_session_token(&token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(
            service().validate_session_token("not-a-jwt"),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_claims_without_purpose_are_malformed() {
        let now = Utc::now().timestamp();
        let legacy = serde_json::json!({ "user_id": Uuid::new_v4().to_string(), "exp": now + 600 });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &legacy,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(
            service().validate_session_token(&token),
            Err(TokenError::MalformedClaims)
        );
    }

    #[test]
    fn test_session_claims_with_extra_email_are_malformed() {
        let now = Utc::now().timestamp();
        let mixed = serde_json::json!({
            "purpose": "session",
            "sub": Uuid::new_v4().to_string(),
            "email": "x@y.z",
            "iat": now,
            "exp": now + 600
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &mixed,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(
            service().validate_session_token(&token),
            Err(TokenError::MalformedClaims)
        );
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("Bearer   "), None);
        assert_eq!(extract_bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(extract_bearer_token("abc.def.ghi"), None);
    }
}
