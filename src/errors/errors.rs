//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 백엔드 서비스를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 모든 실패를
//! `{"code": ..., "message": ...}` 형태의 JSON 응답으로 변환합니다.
//!
//! ## 상태 코드 매핑
//!
//! | Variant | Status | code |
//! |---------|--------|------|
//! | `ValidationError` | 400 | `malformed_request` |
//! | `AuthenticationError` | 401 | `unauthorized` |
//! | `AuthorizationError` | 403 | `forbidden` |
//! | `NotFound` | 404 | `not_found` |
//! | `ConflictError` | 409 | `conflict` |
//! | `ServiceUnavailable` | 503 | `service_unavailable` |
//! | 그 외 | 500 | `internal_error` |
//!
//! 5xx 응답은 내부 상세 정보를 노출하지 않고 고정 메시지를 반환하며,
//! 원인은 `log::error!`로만 남깁니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn find_post(id: Uuid) -> Result<Post, AppError> {
//!     let post = post_store.get_by_id(id).await?; // StoreError -> AppError
//!     Ok(post)
//! }
//! ```

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 백엔드 서비스에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 의존 서비스 일시 불가 (503 Service Unavailable)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// 클라이언트에게 전달되는 에러 응답 본문
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    /// 응답 본문의 `code` 필드 값
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "malformed_request",
            AppError::AuthenticationError(_) => "unauthorized",
            AppError::AuthorizationError(_) => "forbidden",
            AppError::NotFound(_) => "not_found",
            AppError::ConflictError(_) => "conflict",
            AppError::ServiceUnavailable(_) => "service_unavailable",
            AppError::DatabaseError(_)
            | AppError::RedisError(_)
            | AppError::InternalError(_) => "internal_error",
        }
    }

    /// 클라이언트에게 노출해도 되는 메시지
    fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg) => msg.clone(),
            AppError::ServiceUnavailable(_) => {
                "서비스를 일시적으로 사용할 수 없습니다".to_string()
            }
            _ => "내부 서버 오류가 발생했습니다".to_string(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("❌ {}", self);
        }

        HttpResponse::build(status).json(ErrorBody {
            code: self.code(),
            message: self.public_message(),
        })
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 잘못된 JSON 본문을 400 `malformed_request`로 변환합니다.
///
/// `web::JsonConfig::default().error_handler(json_error_handler)`로 등록합니다.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("잘못된 요청 본문입니다: {}", err)).into()
}

/// 잘못된 경로 파라미터(예: UUID 형식 오류)를 400 `malformed_request`로 변환합니다.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("잘못된 경로 파라미터입니다: {}", err)).into()
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::body::to_bytes;

    async fn body_json(error: AppError) -> serde_json::Value {
        let response = error.error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.code(), "malformed_request");
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("User not found".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Invalid token".to_string());
        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error.code(), "unauthorized");
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("Guests only".to_string());
        assert_eq!(error.error_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(error.code(), "forbidden");
    }

    #[test]
    fn test_service_unavailable_response() {
        let error = AppError::ServiceUnavailable("redis down".to_string());
        assert_eq!(error.error_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_client_error_body_keeps_message() {
        let body = body_json(AppError::ConflictError("username taken".to_string())).await;
        assert_eq!(body["code"], "conflict");
        assert_eq!(body["message"], "username taken");
    }

    #[actix_web::test]
    async fn test_internal_error_body_hides_detail() {
        let body = body_json(AppError::DatabaseError("connection refused at 10.0.0.3".to_string())).await;
        assert_eq!(body["code"], "internal_error");
        assert!(!body["message"].as_str().unwrap().contains("10.0.0.3"));
    }
}
