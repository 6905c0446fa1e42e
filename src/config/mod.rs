//! # Configuration Module
//!
//! 백엔드 서비스의 설정을 하나의 불변 객체([`AppConfig`])로 로드합니다.
//! 설정은 시작 시점에 한 번 읽혀 각 컴포넌트 생성자에 명시적으로 전달되며,
//! 전역 접근자는 제공하지 않습니다.
//!
//! ## 모듈 구성
//!
//! - [`app_config`] - 실행 환경, 서버, Rate Limiting, 저장소 백엔드 설정과 `AppConfig` 본체
//! - [`auth_config`] - JWT 서명 키/만료 시간, 세션 미들웨어 정책
//! - [`data_config`] - MongoDB, Redis 연결 설정
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use blog_auth_service::config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("bind: {}:{}", config.server.host, config.server.port);
//! println!("session ttl: {:?}", config.jwt.session_ttl);
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ### 필수
//!
//! ```bash
//! export JWT_SECRET_KEY="your-super-secret-key"
//! ```
//!
//! ### 선택 (기본값)
//!
//! ```bash
//! export HOST="127.0.0.1"                          # 127.0.0.1
//! export PORT="8080"                               # 8080
//! export JWT_TOKEN_EXPIRATION="15m"                # 15m
//! export JWT_RESET_TOKEN_EXPIRATION="60m"          # 60m
//! export JWT_VERIFICATION_TOKEN_EXPIRATION="1440m" # 1440m
//! export REVOCATION_FAILURE_POLICY="anonymous"     # anonymous | reject
//! export REDIS_URL="redis://localhost:6379"
//! export REDIS_TIMEOUT_MS="500"
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="blog_dev"
//! export STORAGE_BACKEND="mongo"                   # mongo | memory
//! ```

pub mod app_config;
pub mod auth_config;
pub mod data_config;

pub use app_config::*;
pub use auth_config::*;
pub use data_config::*;
