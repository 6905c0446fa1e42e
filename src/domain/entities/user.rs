//! User Entity Implementation
//!
//! 블로그 사용자 엔티티입니다. 비밀번호는 평문으로 보관하지 않고
//! 사용자별 salt와 SHA-256 digest 쌍으로만 저장합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repositories::Record;

/// 사용자 엔티티
///
/// `username`, `email`은 시스템 전체에서 유니크합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", with = "super::uuid_string")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    /// hex 인코딩된 SHA-256(salt + password)
    pub password_hash: String,
    /// hex 인코딩된 16바이트 랜덤 salt
    pub salt: String,
    pub is_email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 새 사용자 생성 (이메일 인증 전 상태)
    pub fn new(
        first_name: String,
        last_name: String,
        username: String,
        email: String,
        password_hash: String,
        salt: String,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            username,
            email,
            password_hash,
            salt,
            is_email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for User {
    const COLLECTION: &'static str = "users";
    const UNIQUE_FIELDS: &'static [&'static str] = &["username", "email"];

    fn id(&self) -> Uuid {
        self.id
    }
}
