//! 사용자 관련 HTTP 핸들러
//!
//! `/api/v1/users` 스코프에 등록됩니다. `/me`는 `/{user_id}`보다 먼저 등록해야
//! 경로 매칭에서 가려지지 않습니다 ([`crate::routes`] 참고).

use actix_web::http::header::AUTHORIZATION;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use uuid::Uuid;
use validator::Validate;

use crate::core::AppContext;
use crate::domain::auth::Identity;
use crate::domain::dto::common::MessageResponse;
use crate::domain::dto::users::{
    LoginRequest, PasswordResetConfirmRequest, PasswordResetRequest, RegisterRequest,
    TokenResponse, VerifyEmailRequest,
};
use crate::errors::AppError;
use crate::middlewares::AccessGate;

#[post("/register", wrap = "AccessGate::guest_only()")]
pub async fn register(
    context: web::Data<AppContext>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = context.users.register(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

#[post("/login", wrap = "AccessGate::guest_only()")]
pub async fn login(
    context: web::Data<AppContext>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let token = context
        .users
        .login(&payload.username_or_email, &payload.password)
        .await?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// 현재 세션 토큰을 폐기합니다.
///
/// 게이트를 통과했더라도 폐기 저장소 기록이 실패하면 500을 반환하며,
/// 이 경우 토큰은 여전히 유효합니다.
#[post("/logout", wrap = "AccessGate::require_login()")]
pub async fn logout(
    context: web::Data<AppContext>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    context.sessions.logout(authorization).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("로그아웃되었습니다")))
}

#[get("/me", wrap = "AccessGate::require_login()")]
pub async fn me(
    context: web::Data<AppContext>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let user = context.users.get_user_by_id(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[post("/verify-email")]
pub async fn verify_email(
    context: web::Data<AppContext>,
    payload: web::Json<VerifyEmailRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = context.users.verify_email(&payload.token).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[post("/verify-email/resend", wrap = "AccessGate::require_login()")]
pub async fn resend_verification(
    context: web::Data<AppContext>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    context.users.resend_verification(identity.user_id).await?;
    Ok(HttpResponse::Accepted().json(MessageResponse::new("인증 메일을 다시 보냈습니다")))
}

#[post("/password-reset/request", wrap = "AccessGate::guest_only()")]
pub async fn request_password_reset(
    context: web::Data<AppContext>,
    payload: web::Json<PasswordResetRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    context.users.request_password_reset(&payload.email).await?;
    Ok(HttpResponse::Accepted().json(MessageResponse::new(
        "가입된 이메일이라면 비밀번호 재설정 메일이 발송됩니다",
    )))
}

#[post("/password-reset/confirm", wrap = "AccessGate::guest_only()")]
pub async fn confirm_password_reset(
    context: web::Data<AppContext>,
    payload: web::Json<PasswordResetConfirmRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    context
        .users
        .reset_password(&payload.token, &payload.new_password)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("비밀번호가 변경되었습니다")))
}

#[get("")]
pub async fn list_users(context: web::Data<AppContext>) -> Result<HttpResponse, AppError> {
    let users = context.users.get_all_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[get("/{user_id}")]
pub async fn get_user(
    context: web::Data<AppContext>,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user = context.users.get_user_by_id(user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}
