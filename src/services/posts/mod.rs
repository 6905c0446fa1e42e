//! 게시글 서비스 모듈
//!
//! 작성자만 수정/삭제할 수 있는 게시글 CRUD와, 댓글을 포함한 상세 조회를 제공합니다.

pub mod post_service;

pub use post_service::PostService;
