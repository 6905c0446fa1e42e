//! 댓글 HTTP 핸들러

use actix_web::{HttpResponse, delete, get, post, put, web};
use uuid::Uuid;
use validator::Validate;

use crate::core::AppContext;
use crate::domain::auth::Identity;
use crate::domain::dto::comments::{CommentRequest, CommentUpdateRequest};
use crate::errors::AppError;
use crate::middlewares::AccessGate;

#[post("", wrap = "AccessGate::require_login()")]
pub async fn create_comment(
    context: web::Data<AppContext>,
    identity: Identity,
    payload: web::Json<CommentRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let comment = context
        .comments
        .create(identity, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(comment))
}

#[get("")]
pub async fn list_comments(context: web::Data<AppContext>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(context.comments.get_all().await?))
}

#[get("/{comment_id}")]
pub async fn get_comment(
    context: web::Data<AppContext>,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let comment = context.comments.get_by_id(comment_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comment))
}

#[put("/{comment_id}", wrap = "AccessGate::require_login()")]
pub async fn update_comment(
    context: web::Data<AppContext>,
    identity: Identity,
    comment_id: web::Path<Uuid>,
    payload: web::Json<CommentUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let comment = context
        .comments
        .update(identity, comment_id.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(comment))
}

#[delete("/{comment_id}", wrap = "AccessGate::require_login()")]
pub async fn delete_comment(
    context: web::Data<AppContext>,
    identity: Identity,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    context
        .comments
        .delete(identity, comment_id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
