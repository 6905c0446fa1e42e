//! 라우트별 접근 게이트
//!
//! [`SessionMiddleware`](super::SessionMiddleware)가 남긴 `Identity` 유무만 보고
//! 요청을 통과시키거나 거부합니다. 토큰을 다시 검증하지 않습니다.
//!
//! | 게이트 | 조건 | 거부 응답 |
//! |--------|------|-----------|
//! | `AccessGate::require_login()` | `Identity` 없음 | 401 `unauthorized` |
//! | `AccessGate::guest_only()` | `Identity` 있음 | 403 `forbidden` |
//!
//! 라우트 하나에는 게이트를 최대 하나만 붙입니다.
//!
//! ```rust,ignore
//! #[post("/logout", wrap = "AccessGate::require_login()")]
//! async fn logout(/* ... */) -> Result<HttpResponse, AppError> { /* ... */ }
//! ```

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::domain::auth::Identity;
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    /// 로그인한 요청만 허용
    RequireLogin,
    /// 로그인하지 않은 요청만 허용
    GuestOnly,
}

impl GateMode {
    /// 게이트를 통과하지 못하면 거부 사유를 반환합니다.
    fn check(self, identity: Option<Identity>) -> Result<(), AppError> {
        match (self, identity) {
            (GateMode::RequireLogin, None) => Err(AppError::AuthenticationError(
                "로그인이 필요한 요청입니다".to_string(),
            )),
            (GateMode::GuestOnly, Some(_)) => Err(AppError::AuthorizationError(
                "로그인하지 않은 사용자만 접근할 수 있습니다".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

pub struct AccessGate {
    mode: GateMode,
}

impl AccessGate {
    pub fn require_login() -> Self {
        Self {
            mode: GateMode::RequireLogin,
        }
    }

    pub fn guest_only() -> Self {
        Self {
            mode: GateMode::GuestOnly,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AccessGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGateService {
            service: Rc::new(service),
            mode: self.mode,
        }))
    }
}

pub struct AccessGateService<S> {
    service: Rc<S>,
    mode: GateMode,
}

impl<S, B> Service<ServiceRequest> for AccessGateService<S>
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
        let mode = self.mode;

        Box::pin(async move {
            let identity = req.extensions().get::<Identity>().copied();

            if let Err(err) = mode.check(identity) {
                log::debug!("{:?} 게이트 거부: {} {}", mode, req.method(), req.path());
                let response = err.error_response();
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::{TestRequest, call_service, init_service, read_body_json};
    use actix_web::{App, HttpResponse, http::StatusCode, web};
    use uuid::Uuid;

    #[test]
    fn test_gate_mode_check() {
        let someone = Some(Identity::new(Uuid::new_v4()));

        assert!(GateMode::RequireLogin.check(someone).is_ok());
        assert!(matches!(
            GateMode::RequireLogin.check(None),
            Err(AppError::AuthenticationError(_))
        ));
        assert!(GateMode::GuestOnly.check(None).is_ok());
        assert!(matches!(
            GateMode::GuestOnly.check(someone),
            Err(AppError::AuthorizationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_require_login_rejects_anonymous_with_json() {
        let app = init_service(
            App::new().service(
                web::resource("/private")
                    .wrap(AccessGate::require_login())
                    .to(|| async { HttpResponse::Ok().finish() }),
            ),
        )
        .await;

        let req = TestRequest::get().uri("/private").to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = read_body_json(res).await;
        assert_eq!(body["code"], "unauthorized");
    }

    #[actix_web::test]
    async fn test_guest_only_allows_anonymous() {
        let app = init_service(
            App::new().service(
                web::resource("/guest")
                    .wrap(AccessGate::guest_only())
                    .to(|| async { HttpResponse::Ok().finish() }),
            ),
        )
        .await;

        let req = TestRequest::get().uri("/guest").to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
