//! 게시글 HTTP 핸들러

use actix_web::{HttpResponse, delete, get, post, put, web};
use uuid::Uuid;
use validator::Validate;

use crate::core::AppContext;
use crate::domain::auth::Identity;
use crate::domain::dto::posts::PostRequest;
use crate::errors::AppError;
use crate::middlewares::AccessGate;

#[post("", wrap = "AccessGate::require_login()")]
pub async fn create_post(
    context: web::Data<AppContext>,
    identity: Identity,
    payload: web::Json<PostRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let post = context.posts.create(identity, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(post))
}

#[get("")]
pub async fn list_posts(context: web::Data<AppContext>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(context.posts.get_all().await?))
}

#[get("/{post_id}")]
pub async fn get_post(
    context: web::Data<AppContext>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let post = context.posts.get_by_id(post_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[put("/{post_id}", wrap = "AccessGate::require_login()")]
pub async fn update_post(
    context: web::Data<AppContext>,
    identity: Identity,
    post_id: web::Path<Uuid>,
    payload: web::Json<PostRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let post = context
        .posts
        .update(identity, post_id.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

#[delete("/{post_id}", wrap = "AccessGate::require_login()")]
pub async fn delete_post(
    context: web::Data<AppContext>,
    identity: Identity,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    context.posts.delete(identity, post_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
