//! 게시글 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::dto::comments::CommentResponse;
use crate::domain::entities::Post;

/// 게시글 생성/수정 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostRequest {
    #[validate(length(min = 5, max = 50, message = "제목은 5-50자 사이여야 합니다"))]
    pub title: String,

    #[validate(length(min = 5, max = 1000, message = "본문은 5-1000자 사이여야 합니다"))]
    pub content: String,
}

/// 게시글 응답
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            user_id: post.user_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// 댓글을 포함한 게시글 상세 응답
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}
