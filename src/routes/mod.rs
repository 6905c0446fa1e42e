//! 라우트 구성
//!
//! 모든 엔드포인트를 `configure_all_routes` 한 곳에서 등록합니다.
//! 세션 미들웨어는 `App` 수준에서 감싸고, 접근 게이트는 각 핸들러의
//! `wrap` 속성으로 붙어 있습니다.
//!
//! | 스코프 | 핸들러 모듈 |
//! |--------|-------------|
//! | `/health` | 이 모듈 |
//! | `/api/v1/users` | [`handlers::users`] |
//! | `/api/v1/posts` | [`handlers::posts`] |
//! | `/api/v1/comments` | [`handlers::comments`] |

use actix_web::{HttpResponse, get, web};
use serde_json::json;

use crate::errors::{json_error_handler, path_error_handler};
use crate::handlers;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // 본문/경로 파싱 실패도 {"code", "message"} 형태로 응답
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler));

    cfg.service(health_check);

    configure_user_routes(cfg);
    configure_post_routes(cfg);
    configure_comment_routes(cfg);
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .service(handlers::users::register)
            .service(handlers::users::login)
            .service(handlers::users::logout)
            .service(handlers::users::me)
            .service(handlers::users::verify_email)
            .service(handlers::users::resend_verification)
            .service(handlers::users::request_password_reset)
            .service(handlers::users::confirm_password_reset)
            .service(handlers::users::list_users)
            // `/me`보다 뒤에 있어야 함
            .service(handlers::users::get_user),
    );
}

fn configure_post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/posts")
            .service(handlers::posts::create_post)
            .service(handlers::posts::list_posts)
            .service(handlers::posts::get_post)
            .service(handlers::posts::update_post)
            .service(handlers::posts::delete_post),
    );
}

fn configure_comment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/comments")
            .service(handlers::comments::create_comment)
            .service(handlers::comments::list_comments)
            .service(handlers::comments::get_comment)
            .service(handlers::comments::update_comment)
            .service(handlers::comments::delete_comment),
    );
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "blog_auth_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
