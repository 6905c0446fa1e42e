//! 세션 판별 및 로그아웃 서비스
//!
//! 요청의 `Authorization` 헤더 하나로부터 요청을 익명/인증됨 중 하나로 분류하고,
//! 로그아웃 시 세션 토큰을 남은 수명 동안 폐기 목록에 올립니다.
//!
//! ## 판별 순서
//!
//! ```text
//! Authorization 헤더
//!   │  없음/형식 오류 ──────────────────────────▶ Anonymous(NoCredential)
//!   ▼
//! 폐기 목록 조회
//!   │  폐기됨 ─────────────────────────────────▶ Anonymous(Revoked)
//!   │  저장소 오류 ─ policy=Anonymous ──────────▶ Anonymous(StoreUnavailable)
//!   │             └ policy=Reject ─────────────▶ Unavailable (503)
//!   ▼
//! 세션 토큰 검증
//!   │  실패 ───────────────────────────────────▶ Anonymous(InvalidToken)
//!   ▼
//! Authenticated(Identity)
//! ```
//!
//! 이 단계에서는 어떤 요청도 401/403으로 거부하지 않습니다. 거부는 라우트별
//! `AccessGate`에서만 일어납니다.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info, warn};
use thiserror::Error;

use crate::config::{RevocationFailurePolicy, SessionConfig};
use crate::domain::auth::Identity;
use crate::errors::AppError;
use crate::repositories::tokens::{RevocationError, RevocationStore};
use crate::services::auth::token_service::{TokenService, extract_bearer_token};

/// 익명으로 처리된 이유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnonymousReason {
    /// 헤더가 없거나 `Bearer <token>` 형식이 아님
    NoCredential,
    /// 로그아웃으로 폐기된 토큰
    Revoked,
    /// 폐기 목록 조회 실패
    StoreUnavailable,
    /// 서명/만료/용도 검증 실패
    InvalidToken,
}

/// 요청 하나에 대한 세션 판별 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionResolution {
    Anonymous(AnonymousReason),
    Authenticated(Identity),
    /// 폐기 목록 조회 실패 + `RevocationFailurePolicy::Reject`
    Unavailable,
}

impl SessionResolution {
    pub fn identity(&self) -> Option<Identity> {
        match self {
            SessionResolution::Authenticated(identity) => Some(*identity),
            _ => None,
        }
    }
}

/// 로그아웃 실패
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LogoutError {
    #[error("authorization header is missing")]
    Unauthorized,

    #[error("token could not be parsed")]
    InvalidToken,

    #[error("token has already expired")]
    AlreadyExpired,

    #[error("token revocation failed: {0}")]
    RevocationFailed(RevocationError),
}

impl From<LogoutError> for AppError {
    fn from(error: LogoutError) -> Self {
        match error {
            LogoutError::Unauthorized => {
                AppError::AuthenticationError("인증 토큰이 필요합니다".to_string())
            }
            LogoutError::InvalidToken => {
                AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
            }
            LogoutError::AlreadyExpired => {
                AppError::AuthenticationError("이미 만료된 토큰입니다".to_string())
            }
            LogoutError::RevocationFailed(e) => AppError::RedisError(e.to_string()),
        }
    }
}

/// 세션 판별/로그아웃 서비스
pub struct SessionService {
    tokens: Arc<TokenService>,
    revocations: Arc<dyn RevocationStore>,
    failure_policy: RevocationFailurePolicy,
}

impl SessionService {
    pub fn new(
        tokens: Arc<TokenService>,
        revocations: Arc<dyn RevocationStore>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            tokens,
            revocations,
            failure_policy: config.revocation_failure_policy,
        }
    }

    /// `Authorization` 헤더 값으로 요청을 분류합니다.
    pub async fn resolve(&self, authorization: Option<&str>) -> SessionResolution {
        let Some(token) = authorization.and_then(extract_bearer_token) else {
            return SessionResolution::Anonymous(AnonymousReason::NoCredential);
        };

        match self.revocations.is_revoked(token).await {
            Ok(false) => {}
            Ok(true) => {
                debug!("폐기된 토큰으로 요청, 익명 처리");
                return SessionResolution::Anonymous(AnonymousReason::Revoked);
            }
            Err(err) => {
                return match self.failure_policy {
                    RevocationFailurePolicy::Anonymous => {
                        warn!("⚠️ 폐기 목록 조회 실패, 익명으로 진행: {}", err);
                        SessionResolution::Anonymous(AnonymousReason::StoreUnavailable)
                    }
                    RevocationFailurePolicy::Reject => {
                        warn!("⚠️ 폐기 목록 조회 실패, 요청 거부: {}", err);
                        SessionResolution::Unavailable
                    }
                };
            }
        }

        match self.tokens.validate_session_token(token) {
            Ok(user_id) => {
                debug!("인증 성공: 사용자 ID {}", user_id);
                SessionResolution::Authenticated(Identity::new(user_id))
            }
            Err(err) => {
                debug!("세션 토큰 검증 실패, 익명 처리: {}", err);
                SessionResolution::Anonymous(AnonymousReason::InvalidToken)
            }
        }
    }

    /// 현재 세션 토큰을 남은 수명 동안 폐기합니다.
    ///
    /// 저장소 기록이 실패하면 로그아웃되지 않은 것으로 간주하고 에러를 반환합니다.
    pub async fn logout(&self, authorization: Option<&str>) -> Result<(), LogoutError> {
        let token = authorization
            .and_then(extract_bearer_token)
            .ok_or(LogoutError::Unauthorized)?;

        let claims = self
            .tokens
            .parse_claims(token)
            .map_err(|_| LogoutError::InvalidToken)?;

        debug!("로그아웃 요청 토큰 용도: {:?}", claims.purpose());

        let remaining_secs = claims.expires_at() - Utc::now().timestamp();
        if remaining_secs <= 0 {
            return Err(LogoutError::AlreadyExpired);
        }

        let remaining = Duration::from_secs(remaining_secs as u64);
        self.revocations
            .revoke(token, remaining)
            .await
            .map_err(LogoutError::RevocationFailed)?;

        info!("🔒 로그아웃 처리 완료 (남은 수명 {}초)", remaining_secs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::domain::token::{ClaimSet, SessionClaims};
    use crate::repositories::tokens::{MemoryRevocationStore, UnreachableRevocationStore};
    use uuid::Uuid;

    fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(&JwtConfig {
            secret: "session-test-secret".to_string(),
            session_ttl: Duration::from_secs(900),
            verification_ttl: Duration::from_secs(900),
            password_reset_ttl: Duration::from_secs(900),
        }))
    }

    fn session_service(
        store: Arc<dyn RevocationStore>,
        policy: RevocationFailurePolicy,
    ) -> (SessionService, Arc<TokenService>) {
        let tokens = token_service();
        let service = SessionService::new(
            tokens.clone(),
            store,
            &SessionConfig {
                revocation_failure_policy: policy,
            },
        );
        (service, tokens)
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {}", token)
    }

    #[tokio::test]
    async fn test_missing_header_is_anonymous() {
        let (service, _) = session_service(
            Arc::new(MemoryRevocationStore::new()),
            RevocationFailurePolicy::Anonymous,
        );

        assert_eq!(
            service.resolve(None).await,
            SessionResolution::Anonymous(AnonymousReason::NoCredential)
        );
        assert_eq!(
            service.resolve(Some("Basic abc")).await,
            SessionResolution::Anonymous(AnonymousReason::NoCredential)
        );
    }

    #[tokio::test]
    async fn test_valid_token_is_authenticated() {
        let (service, tokens) = session_service(
            Arc::new(MemoryRevocationStore::new()),
            RevocationFailurePolicy::Anonymous,
        );
        let user_id = Uuid::new_v4();
        let header = bearer(&tokens.issue_session_token(user_id).unwrap());

        let resolution = service.resolve(Some(&header)).await;
        assert_eq!(resolution.identity(), Some(Identity::new(user_id)));
    }

    #[tokio::test]
    async fn test_invalid_token_is_anonymous() {
        let (service, tokens) = session_service(
            Arc::new(MemoryRevocationStore::new()),
            RevocationFailurePolicy::Anonymous,
        );
        let reset = tokens.issue_password_reset_token("alice@x.com").unwrap();

        assert_eq!(
            service.resolve(Some(&bearer(&reset))).await,
            SessionResolution::Anonymous(AnonymousReason::InvalidToken)
        );
        assert_eq!(
            service.resolve(Some("Bearer garbage")).await,
            SessionResolution::Anonymous(AnonymousReason::InvalidToken)
        );
    }

    #[tokio::test]
    async fn test_logout_then_resolve_is_revoked() {
        let (service, tokens) = session_service(
            Arc::new(MemoryRevocationStore::new()),
            RevocationFailurePolicy::Anonymous,
        );
        let header = bearer(&tokens.issue_session_token(Uuid::new_v4()).unwrap());

        service.logout(Some(&header)).await.unwrap();

        assert_eq!(
            service.resolve(Some(&header)).await,
            SessionResolution::Anonymous(AnonymousReason::Revoked)
        );
    }

    #[tokio::test]
    async fn test_store_failure_fails_open_by_default() {
        let (service, tokens) = session_service(
            Arc::new(UnreachableRevocationStore),
            RevocationFailurePolicy::Anonymous,
        );
        let header = bearer(&tokens.issue_session_token(Uuid::new_v4()).unwrap());

        assert_eq!(
            service.resolve(Some(&header)).await,
            SessionResolution::Anonymous(AnonymousReason::StoreUnavailable)
        );
    }

    #[tokio::test]
    async fn test_store_failure_rejects_when_configured() {
        let (service, tokens) = session_service(
            Arc::new(UnreachableRevocationStore),
            RevocationFailurePolicy::Reject,
        );
        let header = bearer(&tokens.issue_session_token(Uuid::new_v4()).unwrap());

        assert_eq!(service.resolve(Some(&header)).await, SessionResolution::Unavailable);
    }

    #[tokio::test]
    async fn test_logout_without_header() {
        let (service, _) = session_service(
            Arc::new(MemoryRevocationStore::new()),
            RevocationFailurePolicy::Anonymous,
        );
        assert_eq!(service.logout(None).await, Err(LogoutError::Unauthorized));
    }

    #[tokio::test]
    async fn test_logout_with_unparseable_token() {
        let (service, _) = session_service(
            Arc::new(MemoryRevocationStore::new()),
            RevocationFailurePolicy::Anonymous,
        );
        assert_eq!(
            service.logout(Some("Bearer nonsense")).await,
            Err(LogoutError::InvalidToken)
        );
    }

    #[tokio::test]
    async fn test_logout_with_expired_token() {
        let (service, tokens) = session_service(
            Arc::new(MemoryRevocationStore::new()),
            RevocationFailurePolicy::Anonymous,
        );
        let now = Utc::now().timestamp();
        let expired = tokens
            .sign(&ClaimSet::Session(SessionClaims {
                sub: Uuid::new_v4(),
                iat: now - 100,
                exp: now - 1,
            }))
            .unwrap();

        assert_eq!(
            service.logout(Some(&bearer(&expired))).await,
            Err(LogoutError::AlreadyExpired)
        );
    }

    #[tokio::test]
    async fn test_logout_store_failure_propagates() {
        let (service, tokens) = session_service(
            Arc::new(UnreachableRevocationStore),
            RevocationFailurePolicy::Anonymous,
        );
        let header = bearer(&tokens.issue_session_token(Uuid::new_v4()).unwrap());

        assert!(matches!(
            service.logout(Some(&header)).await,
            Err(LogoutError::RevocationFailed(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_revocation_ttl_matches_remaining_lifetime() {
        let store = Arc::new(MemoryRevocationStore::new());
        let (service, tokens) = session_service(store.clone(), RevocationFailurePolicy::Anonymous);
        let token = tokens.issue_session_token(Uuid::new_v4()).unwrap();

        service.logout(Some(&bearer(&token))).await.unwrap();

        // 세션 TTL 900초: 898초 뒤에도 폐기 상태, 901초 뒤에는 기록이 사라짐
        tokio::time::advance(Duration::from_secs(898)).await;
        assert!(store.is_revoked(&token).await.unwrap());

        tokio::time::advance(Duration::from_secs(3)).await;
        assert!(!store.is_revoked(&token).await.unwrap());
    }
}
