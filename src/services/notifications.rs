//! 메일 발송 서비스
//!
//! 이메일 인증/비밀번호 재설정 토큰을 사용자에게 전달하는 경계입니다.
//! 기본 구현 [`LogMailer`]는 실제로 메일을 보내지 않고 로그로 남깁니다.
//! 토큰 값은 `debug!` 레벨에서만 출력됩니다.

use async_trait::async_trait;
use log::{debug, info};

use crate::errors::AppError;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_verification(&self, email: &str, token: &str) -> Result<(), AppError>;

    async fn send_password_reset(&self, email: &str, token: &str) -> Result<(), AppError>;
}

/// 로그 기반 메일러
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_verification(&self, email: &str, token: &str) -> Result<(), AppError> {
        info!("📧 이메일 인증 메일 발송: {}", email);
        debug!("이메일 인증 토큰 ({}): {}", email, token);
        Ok(())
    }

    async fn send_password_reset(&self, email: &str, token: &str) -> Result<(), AppError> {
        info!("📧 비밀번호 재설정 메일 발송: {}", email);
        debug!("비밀번호 재설정 토큰 ({}): {}", email, token);
        Ok(())
    }
}

/// 발송 내역을 기록하는 메일러 (테스트용)
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingMailer {
    pub sent: tokio::sync::Mutex<Vec<(String, String, String)>>,
}

#[cfg(test)]
impl RecordingMailer {
    /// 마지막으로 `kind` 메일에 담긴 토큰
    pub async fn last_token(&self, kind: &str) -> Option<String> {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find(|(k, _, _)| k == kind)
            .map(|(_, _, token)| token.clone())
    }
}

#[cfg(test)]
#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_verification(&self, email: &str, token: &str) -> Result<(), AppError> {
        self.sent.lock().await.push((
            "verification".to_string(),
            email.to_string(),
            token.to_string(),
        ));
        Ok(())
    }

    async fn send_password_reset(&self, email: &str, token: &str) -> Result<(), AppError> {
        self.sent.lock().await.push((
            "password_reset".to_string(),
            email.to_string(),
            token.to_string(),
        ));
        Ok(())
    }
}
