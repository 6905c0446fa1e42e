//! 댓글 관리 서비스 구현
//!
//! 댓글은 존재하는 게시글에만 달 수 있으며 수정과 삭제는 작성자 본인만 할 수 있습니다.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::auth::Identity;
use crate::domain::dto::comments::{CommentRequest, CommentResponse, CommentUpdateRequest};
use crate::domain::entities::{Comment, Post};
use crate::errors::AppError;
use crate::repositories::{RecordStore, StoreError};

pub struct CommentService {
    comments: Arc<dyn RecordStore<Comment>>,
    posts: Arc<dyn RecordStore<Post>>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn RecordStore<Comment>>, posts: Arc<dyn RecordStore<Post>>) -> Self {
        Self { comments, posts }
    }

    /// 댓글 작성
    ///
    /// 대상 게시글이 없으면 `NotFound`를 반환합니다.
    pub async fn create(
        &self,
        author: Identity,
        request: CommentRequest,
    ) -> Result<CommentResponse, AppError> {
        self.posts.get_by_id(request.post_id).await.map_err(|e| match e {
            StoreError::NotFound { .. } => {
                AppError::NotFound("댓글을 달 게시글을 찾을 수 없습니다".to_string())
            }
            other => other.into(),
        })?;

        let comment = Comment::new(author.user_id, request.post_id, request.content);
        let comment = self.comments.create(comment).await?;

        log::info!("💬 댓글 작성: {} (게시글 {})", comment.id, comment.post_id);
        Ok(CommentResponse::from(comment))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CommentResponse, AppError> {
        Ok(CommentResponse::from(self.find(id).await?))
    }

    pub async fn get_all(&self) -> Result<Vec<CommentResponse>, AppError> {
        let comments = self.comments.get_all().await?;
        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }

    pub async fn update(
        &self,
        caller: Identity,
        id: Uuid,
        request: CommentUpdateRequest,
    ) -> Result<CommentResponse, AppError> {
        let mut comment = self.find(id).await?;
        ensure_owner(&comment, caller)?;

        comment.content = request.content;
        comment.updated_at = Utc::now();

        let comment = self.comments.update(comment).await?;
        Ok(CommentResponse::from(comment))
    }

    pub async fn delete(&self, caller: Identity, id: Uuid) -> Result<(), AppError> {
        let comment = self.find(id).await?;
        ensure_owner(&comment, caller)?;

        self.comments.delete(comment.id).await?;
        log::info!("🗑️ 댓글 삭제: {}", comment.id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Comment, AppError> {
        self.comments.get_by_id(id).await.map_err(|e| match e {
            StoreError::NotFound { .. } => AppError::NotFound("댓글을 찾을 수 없습니다".to_string()),
            other => other.into(),
        })
    }
}

fn ensure_owner(comment: &Comment, caller: Identity) -> Result<(), AppError> {
    if comment.is_owned_by(caller.user_id) {
        Ok(())
    } else {
        Err(AppError::AuthorizationError(
            "본인이 작성한 댓글만 변경할 수 있습니다".to_string(),
        ))
    }
}
