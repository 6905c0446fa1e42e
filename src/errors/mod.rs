//! 에러 처리 모듈

pub mod errors;

pub use errors::{AppError, AppResult, ErrorBody, json_error_handler, path_error_handler};
