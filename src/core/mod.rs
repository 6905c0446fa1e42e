//! 애플리케이션 핵심 구성 요소
//!
//! 시작 시 설정으로부터 저장소와 서비스를 한 번 조립하여 [`AppContext`]로 묶습니다.
//! 핸들러는 `web::Data<AppContext>`로 서비스에 접근합니다.

pub mod context;

pub use context::{AppContext, Stores};
