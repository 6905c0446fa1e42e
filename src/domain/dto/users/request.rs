//! 사용자 요청 DTO
//!
//! 회원가입, 로그인, 이메일 인증, 비밀번호 재설정 요청 본문과 검증 규칙을 정의합니다.

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// 회원가입 요청
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 50, message = "이름은 2-50자 사이여야 합니다"))]
    pub first_name: String,

    #[validate(length(min = 2, max = 50, message = "성은 2-50자 사이여야 합니다"))]
    pub last_name: String,

    /// 사용자명 (3-30자, 영문/숫자만 허용)
    #[validate(length(min = 3, max = 30, message = "사용자명은 3-30자 사이여야 합니다"))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub password: String,
}

/// 로그인 요청 (사용자명 또는 이메일)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "사용자명 또는 이메일을 입력해주세요"))]
    pub username_or_email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 이메일 인증 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(length(min = 1, message = "토큰이 필요합니다"))]
    pub token: String,
}

/// 비밀번호 재설정 메일 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
}

/// 비밀번호 재설정 확정 요청
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetConfirmRequest {
    #[validate(length(min = 1, message = "토큰이 필요합니다"))]
    pub token: String,

    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub new_password: String,
}

/// 사용자명 형식 검증 (영문, 숫자만 허용)
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::new("invalid_username")
            .with_message("사용자명은 알파벳과 숫자만 사용 가능합니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> RegisterRequest {
        RegisterRequest {
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            password: "Secret123".to_string(),
        }
    }

    #[test]
    fn test_valid_register_request() {
        assert!(alice().validate().is_ok());
    }

    #[test]
    fn test_username_rejects_symbols() {
        let request = RegisterRequest {
            username: "alice!".to_string(),
            ..alice()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_short_password_rejected() {
        let request = RegisterRequest {
            password: "short".to_string(),
            ..alice()
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_login_request_camel_case() {
        let request: LoginRequest = serde_json::from_value(serde_json::json!({
            "usernameOrEmail": "alice",
            "password": "Secret123"
        }))
        .unwrap();
        assert_eq!(request.username_or_email, "alice");
    }
}
