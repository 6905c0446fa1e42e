//! 게시글 관리 서비스 구현
//!
//! 작성자는 요청을 보낸 세션의 사용자(`Identity`)로 고정되며,
//! 수정과 삭제는 작성자 본인만 할 수 있습니다.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::auth::Identity;
use crate::domain::dto::comments::CommentResponse;
use crate::domain::dto::posts::{PostDetailResponse, PostRequest, PostResponse};
use crate::domain::entities::{Comment, Post};
use crate::errors::AppError;
use crate::repositories::{RecordStore, StoreError};

pub struct PostService {
    posts: Arc<dyn RecordStore<Post>>,
    comments: Arc<dyn RecordStore<Comment>>,
}

impl PostService {
    pub fn new(posts: Arc<dyn RecordStore<Post>>, comments: Arc<dyn RecordStore<Comment>>) -> Self {
        Self { posts, comments }
    }

    pub async fn create(
        &self,
        author: Identity,
        request: PostRequest,
    ) -> Result<PostResponse, AppError> {
        let post = Post::new(author.user_id, request.title, request.content);
        let post = self.posts.create(post).await?;

        log::info!("📝 게시글 작성: {} (작성자 {})", post.id, author.user_id);
        Ok(PostResponse::from(post))
    }

    /// 게시글과 그 댓글 목록
    pub async fn get_by_id(&self, id: Uuid) -> Result<PostDetailResponse, AppError> {
        let post = self.find(id).await?;
        self.with_comments(post).await
    }

    pub async fn get_all(&self) -> Result<Vec<PostDetailResponse>, AppError> {
        let posts = self.posts.get_all().await?;
        let mut details = Vec::with_capacity(posts.len());
        for post in posts {
            details.push(self.with_comments(post).await?);
        }
        Ok(details)
    }

    /// 작성자 본인만 수정할 수 있습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 게시글 없음
    /// * `AppError::AuthorizationError` - 작성자가 아님
    pub async fn update(
        &self,
        caller: Identity,
        id: Uuid,
        request: PostRequest,
    ) -> Result<PostResponse, AppError> {
        let mut post = self.find(id).await?;
        ensure_owner(&post, caller)?;

        post.title = request.title;
        post.content = request.content;
        post.updated_at = Utc::now();

        let post = self.posts.update(post).await?;
        Ok(PostResponse::from(post))
    }

    /// 게시글을 삭제합니다. 달린 댓글도 함께 삭제합니다.
    pub async fn delete(&self, caller: Identity, id: Uuid) -> Result<(), AppError> {
        let post = self.find(id).await?;
        ensure_owner(&post, caller)?;

        // 댓글을 먼저 지워야 실패 시 게시글 없는 댓글이 남지 않는다
        for comment in self.comments.find_by("post_id", &post.id.to_string()).await? {
            self.comments.delete(comment.id).await?;
        }
        self.posts.delete(post.id).await?;

        log::info!("🗑️ 게시글 삭제: {}", post.id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Post, AppError> {
        self.posts.get_by_id(id).await.map_err(|e| match e {
            StoreError::NotFound { .. } => {
                AppError::NotFound("게시글을 찾을 수 없습니다".to_string())
            }
            other => other.into(),
        })
    }

    async fn with_comments(&self, post: Post) -> Result<PostDetailResponse, AppError> {
        let mut comments = self
            .comments
            .find_by("post_id", &post.id.to_string())
            .await?;
        comments.sort_by_key(|c| c.created_at);

        Ok(PostDetailResponse {
            post: PostResponse::from(post),
            comments: comments.into_iter().map(CommentResponse::from).collect(),
        })
    }
}

fn ensure_owner(post: &Post, caller: Identity) -> Result<(), AppError> {
    if post.is_owned_by(caller.user_id) {
        Ok(())
    } else {
        Err(AppError::AuthorizationError(
            "본인이 작성한 게시글만 변경할 수 있습니다".to_string(),
        ))
    }
}
