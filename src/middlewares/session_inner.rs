use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, forward_ready};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::errors::AppError;
use crate::services::auth::{SessionResolution, SessionService};

pub struct SessionMiddlewareService<S> {
    pub service: Rc<S>,
    pub sessions: Arc<SessionService>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let sessions = self.sessions.clone();

        Box::pin(async move {
            // 헤더 값이 ASCII가 아니면 자격 증명이 없는 것으로 취급
            let authorization = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned);

            match sessions.resolve(authorization.as_deref()).await {
                SessionResolution::Authenticated(identity) => {
                    req.extensions_mut().insert(identity);
                }
                SessionResolution::Anonymous(reason) => {
                    log::debug!("익명 요청: {:?} {}", reason, req.path());
                }
                SessionResolution::Unavailable => {
                    let response = AppError::ServiceUnavailable(
                        "토큰 폐기 목록을 확인할 수 없습니다".to_string(),
                    )
                    .error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
