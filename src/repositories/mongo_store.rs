//! # MongoDB 레코드 저장소
//!
//! 엔티티 하나당 컬렉션 하나를 사용합니다. `_id`에는 UUID 문자열이 들어가며,
//! `Record::UNIQUE_FIELDS`마다 유니크 인덱스를 생성하여 중복 등록을
//! 저장소 수준에서 막습니다 (duplicate key, code 11000 → `StoreError::Conflict`).
//!
//! 모든 연산은 `DATABASE_TIMEOUT_MS`로 제한되며 초과 시 `StoreError::Unavailable`을 반환합니다.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::{debug, info};
use mongodb::{
    Collection, IndexModel,
    bson::{Document, doc},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
};
use uuid::Uuid;

use super::record_store::{Record, RecordStore, StoreError};
use crate::db::Database;

const DUPLICATE_KEY_CODE: i32 = 11000;

pub struct MongoStore<T: Record> {
    collection: Collection<T>,
    timeout: Duration,
}

impl<T: Record> MongoStore<T> {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.get_database().collection::<T>(T::COLLECTION),
            timeout: database.timeout(),
        }
    }

    /// `UNIQUE_FIELDS`에 대한 유니크 인덱스를 생성합니다.
    ///
    /// 이미 같은 인덱스가 있으면 MongoDB가 무시하므로 시작할 때마다 호출해도 됩니다.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        if T::UNIQUE_FIELDS.is_empty() {
            return Ok(());
        }

        let models = T::UNIQUE_FIELDS.iter().map(|field| {
            IndexModel::builder()
                .keys(doc! { *field: 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name(format!("{}_unique", field))
                        .build(),
                )
                .build()
        });

        self.bounded(self.collection.create_indexes(models)).await?;
        info!("✅ {} 컬렉션 유니크 인덱스 확인 완료", T::COLLECTION);
        Ok(())
    }

    async fn bounded<F, R>(&self, operation: F) -> Result<R, StoreError>
    where
        F: IntoFuture<Output = mongodb::error::Result<R>>,
    {
        match tokio::time::timeout(self.timeout, operation).await {
            Ok(result) => result.map_err(map_mongo_error),
            Err(_) => Err(StoreError::Unavailable(format!(
                "{} operation timed out after {:?}",
                T::COLLECTION,
                self.timeout
            ))),
        }
    }

    fn not_found(id: Uuid) -> StoreError {
        StoreError::NotFound {
            collection: T::COLLECTION,
            id,
        }
    }
}

fn id_filter(id: Uuid) -> Document {
    doc! { "_id": id.to_string() }
}

fn map_mongo_error(error: mongodb::error::Error) -> StoreError {
    if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = error.kind.as_ref() {
        if write_error.code == DUPLICATE_KEY_CODE {
            return StoreError::Conflict(write_error.message.clone());
        }
    }
    StoreError::Unavailable(error.to_string())
}

#[async_trait]
impl<T: Record> RecordStore<T> for MongoStore<T> {
    async fn create(&self, record: T) -> Result<T, StoreError> {
        self.bounded(self.collection.insert_one(&record)).await?;
        debug!("{} 레코드 생성: {}", T::COLLECTION, record.id());
        Ok(record)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<T, StoreError> {
        self.bounded(self.collection.find_one(id_filter(id)))
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn get_all(&self) -> Result<Vec<T>, StoreError> {
        self.bounded(async {
            let cursor = self.collection.find(doc! {}).await?;
            cursor.try_collect::<Vec<T>>().await
        })
        .await
    }

    async fn update(&self, record: T) -> Result<T, StoreError> {
        let result = self
            .bounded(self.collection.replace_one(id_filter(record.id()), &record))
            .await?;

        if result.matched_count == 0 {
            return Err(Self::not_found(record.id()));
        }
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = self.bounded(self.collection.delete_one(id_filter(id))).await?;

        if result.deleted_count == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn find_by(&self, field: &str, value: &str) -> Result<Vec<T>, StoreError> {
        let filter = doc! { field: value };
        self.bounded(async {
            let cursor = self.collection.find(filter).await?;
            cursor.try_collect::<Vec<T>>().await
        })
        .await
    }

    async fn find_one_by_any(&self, criteria: &[(&str, &str)]) -> Result<Option<T>, StoreError> {
        if criteria.is_empty() {
            return Ok(None);
        }

        let alternatives: Vec<Document> = criteria
            .iter()
            .map(|(field, value)| doc! { *field: *value })
            .collect();

        self.bounded(self.collection.find_one(doc! { "$or": alternatives }))
            .await
    }
}
