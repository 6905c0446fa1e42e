//! 세션 미들웨어
//!
//! 애플리케이션 전체에 한 번 등록되어 모든 요청의 `Authorization` 헤더를 판별합니다.
//! 인증된 요청이면 [`Identity`](crate::domain::auth::Identity)를 request extension에 넣고,
//! 그렇지 않으면 아무것도 넣지 않은 채 다음 서비스로 넘깁니다.
//!
//! 이 미들웨어는 요청을 401/403으로 거부하지 않습니다. 유일한 예외는
//! `REVOCATION_FAILURE_POLICY=reject` 설정에서 폐기 목록 조회가 실패한 경우의 503입니다.
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(SessionMiddleware::new(context.sessions.clone()))
//!     .configure(configure_all_routes)
//! ```

use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    Error, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::middlewares::session_inner::SessionMiddlewareService;
use crate::services::auth::SessionService;

pub struct SessionMiddleware {
    sessions: Arc<SessionService>,
}

impl SessionMiddleware {
    pub fn new(sessions: Arc<SessionService>) -> Self {
        Self { sessions }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            sessions: self.sessions.clone(),
        }))
    }
}
