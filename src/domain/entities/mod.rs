//! 영속 엔티티
//!
//! 사용자, 게시글, 댓글 엔티티를 정의합니다. 모든 엔티티는 `Uuid` 식별자를 가지며
//! 저장소에는 하이픈 포함 문자열 형태로 기록됩니다.

pub mod comment;
pub mod post;
pub mod user;

pub use comment::Comment;
pub use post::Post;
pub use user::User;

/// `Uuid`를 저장소 백엔드와 무관하게 항상 문자열로 직렬화합니다.
///
/// MongoDB 필터와 메모리 저장소 필드 비교가 모두 `id.to_string()`으로 동작하도록 합니다.
pub(crate) mod uuid_string {
    use serde::{Deserialize, Deserializer, Serializer};
    use uuid::Uuid;

    pub fn serialize<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&id.hyphenated().to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Uuid::parse_str(&raw).map_err(serde::de::Error::custom)
    }
}
