//! HTTP 요청 핸들러 모듈
//!
//! 요청 본문 검증과 응답 변환만 담당하고 비즈니스 로직은 서비스 계층에 위임합니다.
//! 서비스는 `web::Data<AppContext>`로, 인증된 사용자는 `Identity` 추출자로 받습니다.

pub mod comments;
pub mod posts;
pub mod users;
