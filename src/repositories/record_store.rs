//! # 레코드 저장소 인터페이스
//!
//! 엔티티별 CRUD를 하나의 제네릭 trait으로 표현합니다. 서비스 계층은
//! `Arc<dyn RecordStore<T>>`만 알고 있으며 MongoDB인지 메모리인지 알지 못합니다.
//!
//! ## 에러 규약
//!
//! | 상황 | 반환 |
//! |------|------|
//! | ID에 해당하는 레코드 없음 | `StoreError::NotFound` |
//! | 유니크 필드 중복 | `StoreError::Conflict` |
//! | 연결 실패, 타임아웃, 직렬화 오류 | `StoreError::Unavailable` |

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::errors::AppError;

/// 저장소에 기록되는 엔티티
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    /// 컬렉션 이름
    const COLLECTION: &'static str;

    /// 값이 컬렉션 전체에서 유일해야 하는 필드
    const UNIQUE_FIELDS: &'static [&'static str] = &[];

    fn id(&self) -> Uuid;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{collection} record {id} not found")]
    NotFound { collection: &'static str, id: Uuid },

    #[error("duplicate value for unique field '{0}'")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { collection, .. } => {
                AppError::NotFound(format!("요청한 리소스를 찾을 수 없습니다 ({})", collection))
            }
            StoreError::Conflict(field) => {
                AppError::ConflictError(format!("이미 사용 중인 값입니다: {}", field))
            }
            StoreError::Unavailable(detail) => AppError::DatabaseError(detail),
        }
    }
}

/// 엔티티 CRUD 저장소
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    async fn create(&self, record: T) -> Result<T, StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<T, StoreError>;

    async fn get_all(&self) -> Result<Vec<T>, StoreError>;

    /// ID가 같은 레코드를 통째로 교체합니다.
    async fn update(&self, record: T) -> Result<T, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// 문자열 필드가 `value`와 일치하는 레코드 목록
    async fn find_by(&self, field: &str, value: &str) -> Result<Vec<T>, StoreError>;

    /// `criteria` 중 하나라도 일치하는 첫 레코드
    async fn find_one_by_any(&self, criteria: &[(&str, &str)]) -> Result<Option<T>, StoreError>;
}

/// 사용자 저장소 전용 조회
#[async_trait]
pub trait UserLookup {
    /// 사용자명이 `username`이거나 이메일이 `email`인 사용자
    ///
    /// 로그인에서는 같은 입력을 두 인자에 모두 넘깁니다.
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, StoreError>;
}

#[async_trait]
impl<S> UserLookup for S
where
    S: RecordStore<User> + ?Sized,
{
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, StoreError> {
        self.find_one_by_any(&[("username", username), ("email", email)])
            .await
    }
}
