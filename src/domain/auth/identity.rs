//! 세션 미들웨어가 요청에 바인딩하는 사용자 식별 정보
//!
//! `SessionMiddleware`가 세션 토큰 검증에 성공하면 [`Identity`]를 request extensions에
//! 저장합니다. 핸들러는 문자열 키 대신 타입으로 꺼내 씁니다.
//!
//! ```rust,ignore
//! #[get("/me")]
//! async fn me(identity: Identity) -> Result<HttpResponse, AppError> {
//!     // identity.user_id
//! }
//! ```

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use uuid::Uuid;

use crate::errors::AppError;

/// 검증된 세션의 사용자 식별자
///
/// 요청 처리 동안에만 존재하며 어디에도 저장되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
}

impl Identity {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    /// 요청에 바인딩된 Identity 조회
    pub fn from_http_request(req: &HttpRequest) -> Option<Self> {
        req.extensions().get::<Identity>().copied()
    }
}

/// ActixWeb FromRequest trait 구현
///
/// Identity가 없으면 401을 반환합니다. 보통 `AccessGate::require_login()`이
/// 먼저 거부하므로 이 경로는 게이트 없이 사용된 경우에만 실행됩니다.
impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match Identity::from_http_request(req) {
            Some(identity) => ready(Ok(identity)),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_identity_extracted_from_extensions() {
        let user_id = Uuid::new_v4();
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(Identity::new(user_id));

        let identity = Identity::extract(&req).await.unwrap();
        assert_eq!(identity.user_id, user_id);
    }

    #[actix_web::test]
    async fn test_missing_identity_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let result = Identity::extract(&req).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }
}
