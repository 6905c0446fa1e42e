//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 사용자/게시글/댓글을 위한 범용 레코드 저장소([`RecordStore`])와
//! 세션 토큰 폐기 목록([`tokens::RevocationStore`])을 제공합니다.
//!
//! # Features
//!
//! - `MongoStore<T>`: MongoDB 컬렉션 기반 구현 (유니크 인덱스로 중복 방지)
//! - `MemoryStore<T>`: 프로세스 내 구현 (로컬 실행, 테스트)
//! - `RedisRevocationStore` / `MemoryRevocationStore`: TTL 기반 토큰 폐기 목록
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::{RecordStore, UserLookup};
//!
//! let users: Arc<dyn RecordStore<User>> = Arc::new(MemoryStore::new());
//! let user = users.create(user).await?;
//! let found = users.find_by_username_or_email("alice", "alice").await?;
//! ```

pub mod memory_store;
pub mod mongo_store;
pub mod record_store;
pub mod tokens;

pub use memory_store::MemoryStore;
pub use mongo_store::MongoStore;
pub use record_store::{Record, RecordStore, StoreError, UserLookup};
