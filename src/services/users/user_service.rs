//! # 사용자 관리 서비스 구현
//!
//! 회원가입, 로그인, 사용자 조회와 이메일 인증/비밀번호 재설정 흐름을 담당합니다.
//!
//! ## 흐름
//!
//! ```text
//! register ──▶ 중복 확인 ──▶ salt + digest ──▶ 저장 ──▶ 인증 토큰 메일
//! login    ──▶ 사용자 조회 ──▶ digest 비교 ──▶ 세션 토큰 발급
//! verify_email(token)            ──▶ is_email_verified = true
//! request_password_reset(email)  ──▶ (사용자가 있으면) 재설정 토큰 메일
//! reset_password(token, pw)      ──▶ 새 salt + digest 저장
//! ```
//!
//! ## 보안 설계
//!
//! - 로그인 실패는 사용자 존재 여부와 관계없이 같은 메시지를 반환합니다.
//! - 비밀번호 재설정 요청은 가입 여부와 관계없이 항상 성공으로 응답합니다.
//! - 비밀번호, salt, 토큰은 `debug!` 이상 레벨로 로그에 남기지 않습니다.

use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::domain::dto::users::{RegisterRequest, UserResponse};
use crate::domain::entities::User;
use crate::errors::AppError;
use crate::repositories::{RecordStore, StoreError, UserLookup};
use crate::services::auth::TokenService;
use crate::services::notifications::Mailer;
use crate::utils::password::{generate_salt, hash_password, verify_password};

const INVALID_CREDENTIALS: &str = "아이디 또는 비밀번호가 올바르지 않습니다";

/// 사용자 관리 비즈니스 로직 서비스
///
/// 저장소, 토큰 서비스, 메일러를 생성자로 주입받습니다.
pub struct UserService {
    users: Arc<dyn RecordStore<User>>,
    tokens: Arc<TokenService>,
    mailer: Arc<dyn Mailer>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn RecordStore<User>>,
        tokens: Arc<TokenService>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            users,
            tokens,
            mailer,
        }
    }

    /// 새 사용자 등록
    ///
    /// 사용자명 또는 이메일이 이미 사용 중이면 `ConflictError`를 반환합니다.
    /// 등록 후 이메일 인증 토큰을 발급하여 메일러에 전달하며, 메일 발송 실패는
    /// 등록 자체를 실패시키지 않습니다 (재발송 API로 복구 가능).
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 사용자명/이메일 중복
    /// * `AppError::DatabaseError` - 저장소 오류
    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse, AppError> {
        let start_time = Instant::now();

        if self
            .users
            .find_by_username_or_email(&request.username, &request.email)
            .await?
            .is_some()
        {
            return Err(AppError::ConflictError(
                "이미 사용 중인 사용자명 또는 이메일입니다".to_string(),
            ));
        }

        let salt = generate_salt();
        let password_hash = hash_password(&request.password, &salt);

        let user = User::new(
            request.first_name,
            request.last_name,
            request.username,
            request.email,
            password_hash,
            salt,
        );

        // 동시 가입 경쟁은 저장소의 유니크 제약이 Conflict로 걸러냅니다
        let user = self.users.create(user).await?;

        self.send_verification(&user).await;

        log::info!(
            "✅ 사용자 등록 완료: {} (took {:?})",
            user.username,
            start_time.elapsed()
        );
        Ok(UserResponse::from(user))
    }

    /// 사용자명 또는 이메일과 비밀번호로 로그인하여 세션 토큰을 발급합니다.
    pub async fn login(&self, username_or_email: &str, password: &str) -> Result<String, AppError> {
        let start_time = Instant::now();

        let user = self
            .users
            .find_by_username_or_email(username_or_email, username_or_email)
            .await?
            .ok_or_else(|| {
                log::warn!("로그인 실패 (사용자 없음): {}", username_or_email);
                AppError::AuthenticationError(INVALID_CREDENTIALS.to_string())
            })?;

        if !verify_password(password, &user.salt, &user.password_hash) {
            log::warn!("로그인 실패 (비밀번호 불일치): {}", user.username);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.tokens.issue_session_token(user.id)?;

        log::info!("🔑 로그인 성공: {}", user.username);
        log::debug!("Login took: {:?}", start_time.elapsed());
        Ok(token)
    }

    pub async fn get_all_users(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = self.users.get_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get_user_by_id(&self, id: Uuid) -> Result<UserResponse, AppError> {
        let user = self.users.get_by_id(id).await.map_err(not_found)?;
        Ok(UserResponse::from(user))
    }

    /// 이메일 인증 토큰을 확인하고 해당 사용자를 인증 완료 상태로 변경합니다.
    ///
    /// 이미 인증된 사용자라면 아무것도 바꾸지 않고 성공합니다.
    pub async fn verify_email(&self, token: &str) -> Result<UserResponse, AppError> {
        let email = self.tokens.validate_verification_token(token)?;
        let mut user = self.find_by_email(&email).await?.ok_or_else(|| {
            AppError::NotFound("인증 대상 사용자를 찾을 수 없습니다".to_string())
        })?;

        if user.is_email_verified {
            return Ok(UserResponse::from(user));
        }

        user.is_email_verified = true;
        user.updated_at = chrono::Utc::now();
        let user = self.users.update(user).await?;

        log::info!("📨 이메일 인증 완료: {}", user.username);
        Ok(UserResponse::from(user))
    }

    /// 로그인한 사용자에게 이메일 인증 토큰을 다시 보냅니다.
    pub async fn resend_verification(&self, user_id: Uuid) -> Result<(), AppError> {
        let user = self.users.get_by_id(user_id).await.map_err(not_found)?;

        if user.is_email_verified {
            return Err(AppError::ConflictError("이미 인증된 이메일입니다".to_string()));
        }

        let token = self.tokens.issue_verification_token(&user.email)?;
        self.mailer.send_verification(&user.email, &token).await
    }

    /// 비밀번호 재설정 메일을 요청합니다.
    ///
    /// 가입되지 않은 이메일이어도 `Ok(())`를 반환합니다. 저장소 장애는 그대로 전파합니다.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let Some(user) = self.find_by_email(email).await? else {
            log::debug!("비밀번호 재설정 요청: 가입되지 않은 이메일");
            return Ok(());
        };

        let token = self.tokens.issue_password_reset_token(&user.email)?;
        if let Err(e) = self.mailer.send_password_reset(&user.email, &token).await {
            log::warn!("⚠️ 비밀번호 재설정 메일 발송 실패 ({}): {}", user.email, e);
        }
        Ok(())
    }

    /// 재설정 토큰을 확인하고 새 비밀번호로 교체합니다.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AppError> {
        let email = self.tokens.validate_password_reset_token(token)?;
        let mut user = self.find_by_email(&email).await?.ok_or_else(|| {
            AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
        })?;

        let salt = generate_salt();
        user.password_hash = hash_password(new_password, &salt);
        user.salt = salt;
        user.updated_at = chrono::Utc::now();
        self.users.update(user).await?;

        log::info!("🔐 비밀번호 재설정 완료: {}", email);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let mut users = self.users.find_by("email", email).await?;
        Ok(users.pop())
    }

    async fn send_verification(&self, user: &User) {
        let result = match self.tokens.issue_verification_token(&user.email) {
            Ok(token) => self.mailer.send_verification(&user.email, &token).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            log::warn!("⚠️ 이메일 인증 메일 발송 실패 ({}): {}", user.email, e);
        }
    }
}

fn not_found(error: StoreError) -> AppError {
    match error {
        StoreError::NotFound { .. } => AppError::NotFound("사용자를 찾을 수 없습니다".to_string()),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::config::JwtConfig;
    use crate::repositories::MemoryStore;
    use crate::services::notifications::RecordingMailer;

    struct Fixture {
        service: UserService,
        tokens: Arc<TokenService>,
        mailer: Arc<RecordingMailer>,
    }

    fn fixture() -> Fixture {
        let tokens = Arc::new(TokenService::new(&JwtConfig {
            secret: "user-service-secret".to_string(),
            session_ttl: Duration::from_secs(900),
            verification_ttl: Duration::from_secs(3600),
            password_reset_ttl: Duration::from_secs(3600),
        }));
        let mailer = Arc::new(RecordingMailer::default());
        let service = UserService::new(
            Arc::new(MemoryStore::<User>::new()),
            tokens.clone(),
            mailer.clone(),
        );
        Fixture {
            service,
            tokens,
            mailer,
        }
    }

    fn alice() -> RegisterRequest {
        RegisterRequest {
            first_name: "Alice".to_string(),
            last_name: "Kim".to_string(),
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            password: "Secret123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let f = fixture();
        let user = f.service.register(alice()).await.unwrap();
        assert_eq!(user.username, "alice");
        assert!(!user.is_email_verified);

        let token = f.service.login("alice", "Secret123").await.unwrap();
        assert_eq!(f.tokens.validate_session_token(&token), Ok(user.id));

        // 이메일로도 로그인 가능
        assert!(f.service.login("alice@x.com", "Secret123").await.is_ok());
    }

    #[tokio::test]
    async fn test_register_duplicate_is_conflict() {
        let f = fixture();
        f.service.register(alice()).await.unwrap();

        let mut other = alice();
        other.username = "alice2".to_string();
        let result = f.service.register(other).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[tokio::test]
    async fn test_login_failures_share_message() {
        let f = fixture();
        f.service.register(alice()).await.unwrap();

        let wrong_password = f.service.login("alice", "nope").await.unwrap_err();
        let unknown_user = f.service.login("bob", "Secret123").await.unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(matches!(wrong_password, AppError::AuthenticationError(_)));
    }

    #[tokio::test]
    async fn test_verify_email_with_mailed_token() {
        let f = fixture();
        f.service.register(alice()).await.unwrap();

        let token = f.mailer.last_token("verification").await.unwrap();
        let user = f.service.verify_email(&token).await.unwrap();
        assert!(user.is_email_verified);

        let result = f.service.resend_verification(user.id).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[tokio::test]
    async fn test_session_token_cannot_verify_email() {
        let f = fixture();
        let user = f.service.register(alice()).await.unwrap();
        let session = f.tokens.issue_session_token(user.id).unwrap();

        let result = f.service.verify_email(&session).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[tokio::test]
    async fn test_password_reset_flow() {
        let f = fixture();
        f.service.register(alice()).await.unwrap();

        f.service.request_password_reset("alice@x.com").await.unwrap();
        let token = f.mailer.last_token("password_reset").await.unwrap();

        f.service.reset_password(&token, "NewSecret456").await.unwrap();

        assert!(f.service.login("alice", "Secret123").await.is_err());
        assert!(f.service.login("alice", "NewSecret456").await.is_ok());
    }

    #[tokio::test]
    async fn test_password_reset_for_unknown_email_is_silent() {
        let f = fixture();
        f.service.request_password_reset("ghost@x.com").await.unwrap();
        assert!(f.mailer.last_token("password_reset").await.is_none());
    }

    #[tokio::test]
    async fn test_get_unknown_user_is_not_found() {
        let f = fixture();
        let result = f.service.get_user_by_id(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
