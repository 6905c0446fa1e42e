//! 서비스 조립
//!
//! ```text
//! AppConfig ──▶ Stores (Mongo | Memory) ─┐
//!           ──▶ RevocationStore (Redis | Memory) ─┼──▶ AppContext
//!           ──▶ Mailer ───────────────────┘
//! ```
//!
//! 전역 싱글톤 없이 생성자 주입만 사용합니다. 조립된 `AppContext`는
//! `web::Data`로 감싸 모든 워커가 공유합니다.

use std::sync::Arc;

use log::info;

use crate::caching::redis::RedisClient;
use crate::config::{AppConfig, StorageBackend};
use crate::db::Database;
use crate::domain::entities::{Comment, Post, User};
use crate::errors::AppError;
use crate::repositories::tokens::{MemoryRevocationStore, RedisRevocationStore, RevocationStore};
use crate::repositories::{MemoryStore, MongoStore, RecordStore};
use crate::services::auth::{SessionService, TokenService};
use crate::services::comments::CommentService;
use crate::services::notifications::{LogMailer, Mailer};
use crate::services::posts::PostService;
use crate::services::users::UserService;

/// 엔티티별 레코드 저장소 묶음
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn RecordStore<User>>,
    pub posts: Arc<dyn RecordStore<Post>>,
    pub comments: Arc<dyn RecordStore<Comment>>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryStore::<User>::new()),
            posts: Arc::new(MemoryStore::<Post>::new()),
            comments: Arc::new(MemoryStore::<Comment>::new()),
        }
    }

    /// MongoDB 컬렉션 저장소를 만들고 유니크 인덱스를 확인합니다.
    pub async fn mongo(database: &Database) -> Result<Self, AppError> {
        let users = MongoStore::<User>::new(database);
        users.ensure_indexes().await?;

        Ok(Self {
            users: Arc::new(users),
            posts: Arc::new(MongoStore::<Post>::new(database)),
            comments: Arc::new(MongoStore::<Comment>::new(database)),
        })
    }
}

/// 요청 처리에 필요한 서비스 묶음
#[derive(Clone)]
pub struct AppContext {
    pub tokens: Arc<TokenService>,
    pub sessions: Arc<SessionService>,
    pub users: Arc<UserService>,
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
}

impl AppContext {
    pub fn assemble(
        config: &AppConfig,
        stores: Stores,
        revocations: Arc<dyn RevocationStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(&config.jwt));
        let sessions = Arc::new(SessionService::new(
            tokens.clone(),
            revocations,
            &config.session,
        ));

        Self {
            users: Arc::new(UserService::new(stores.users, tokens.clone(), mailer)),
            posts: Arc::new(PostService::new(stores.posts.clone(), stores.comments.clone())),
            comments: Arc::new(CommentService::new(stores.comments, stores.posts)),
            tokens,
            sessions,
        }
    }

    /// `STORAGE_BACKEND` 설정에 따라 외부 저장소에 연결하거나 메모리 구현을 사용합니다.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        match config.storage {
            StorageBackend::Mongo => Self::connect(config).await,
            StorageBackend::Memory => {
                info!("🧪 메모리 저장소로 실행합니다 (재시작 시 데이터 유실)");
                Ok(Self::in_memory(config))
            }
        }
    }

    /// MongoDB와 Redis에 연결하여 조립합니다.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let database = Database::connect(&config.database)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        let redis = RedisClient::connect(&config.redis)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        let stores = Stores::mongo(&database).await?;

        Ok(Self::assemble(
            config,
            stores,
            Arc::new(RedisRevocationStore::new(redis)),
            Arc::new(LogMailer),
        ))
    }

    pub fn in_memory(config: &AppConfig) -> Self {
        Self::assemble(
            config,
            Stores::in_memory(),
            Arc::new(MemoryRevocationStore::new()),
            Arc::new(LogMailer),
        )
    }
}
