//! 사용자 응답 DTO

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::User;

/// 사용자 응답 (비밀번호 digest, salt 제외)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub is_email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            first_name,
            last_name,
            username,
            email,
            is_email_verified,
            created_at,
            ..
        } = user;

        Self {
            id,
            first_name,
            last_name,
            username,
            email,
            is_email_verified,
            created_at,
        }
    }
}

/// 로그인 응답
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
