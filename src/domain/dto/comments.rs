//! 댓글 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::Comment;

/// 댓글 생성 요청
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    #[validate(length(min = 1, max = 1000, message = "댓글은 1-1000자 사이여야 합니다"))]
    pub content: String,
    pub post_id: Uuid,
}

/// 댓글 수정 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentUpdateRequest {
    #[validate(length(min = 1, max = 1000, message = "댓글은 1-1000자 사이여야 합니다"))]
    pub content: String,
}

/// 댓글 응답
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            user_id: comment.user_id,
            post_id: comment.post_id,
            created_at: comment.created_at,
        }
    }
}
