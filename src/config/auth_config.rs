//! # Authentication Configuration Module
//!
//! JWT 서명 키와 용도별 토큰 만료 시간, 세션 미들웨어의 폐기 저장소 장애 정책을 정의합니다.
//!
//! ## 토큰 용도별 만료 시간
//!
//! | 용도 | 환경 변수 | 기본값 |
//! |------|-----------|--------|
//! | 세션 | `JWT_TOKEN_EXPIRATION` | 15m |
//! | 비밀번호 재설정 | `JWT_RESET_TOKEN_EXPIRATION` | 60m |
//! | 이메일 인증 | `JWT_VERIFICATION_TOKEN_EXPIRATION` | 1440m |
//!
//! 용도별로 만료 시간을 분리하여 비밀번호 재설정 토큰이
//! 장기 자격 증명처럼 재사용되지 않도록 합니다.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// JWT 서명 및 만료 설정
///
/// `TokenService` 생성 시 한 번 전달되며 이후 변경되지 않습니다.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 공유 비밀 키
    pub secret: String,
    /// 세션 토큰 유효 기간
    pub session_ttl: Duration,
    /// 이메일 인증 토큰 유효 기간
    pub verification_ttl: Duration,
    /// 비밀번호 재설정 토큰 유효 기간
    pub password_reset_ttl: Duration,
}

// 비밀 키가 로그에 찍히지 않도록 Debug를 직접 구현
impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("session_ttl", &self.session_ttl)
            .field("verification_ttl", &self.verification_ttl)
            .field("password_reset_ttl", &self.password_reset_ttl)
            .finish()
    }
}

/// 폐기 저장소(Redis) 조회 실패 시 세션 미들웨어의 동작
///
/// 기본값은 `Anonymous`로, 저장소에 접근할 수 없으면 요청을 익명으로 계속 처리합니다.
/// 로그인이 필요한 라우트는 이후 `RequireLogin` 게이트에서 401로 거부되므로
/// 폐기된 토큰이 인증된 요청으로 통과하는 일은 없습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationFailurePolicy {
    /// 익명 요청으로 진행 (가용성 우선)
    Anonymous,
    /// 503 Service Unavailable로 즉시 거부
    Reject,
}

impl FromStr for RevocationFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anonymous" | "fail-open" | "open" => Ok(Self::Anonymous),
            "reject" | "fail-closed" | "closed" => Ok(Self::Reject),
            other => Err(format!("unknown revocation failure policy '{}'", other)),
        }
    }
}

/// 세션 미들웨어 설정
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub revocation_failure_policy: RevocationFailurePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            revocation_failure_policy: RevocationFailurePolicy::Anonymous,
        }
    }
}
