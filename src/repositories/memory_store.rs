//! 프로세스 내 레코드 저장소
//!
//! `STORAGE_BACKEND=memory` 실행과 테스트에서 MongoDB 대신 사용합니다.
//! 유니크 필드 검사와 필드 조회는 레코드를 `serde_json::Value`로 직렬화하여
//! MongoDB 문서와 같은 필드 이름으로 비교합니다.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::record_store::{Record, RecordStore, StoreError};

pub struct MemoryStore<T: Record> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn field_matches<T: Record>(record: &T, field: &str, value: &str) -> bool {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => matches!(map.get(field), Some(Value::String(s)) if s == value),
        _ => false,
    }
}

fn field_value<T: Record>(record: &T, field: &str) -> Option<String> {
    match serde_json::to_value(record).ok()? {
        Value::Object(map) => map.get(field).and_then(|v| v.as_str()).map(str::to_string),
        _ => None,
    }
}

/// `candidate`가 다른 레코드와 유니크 필드 값을 공유하는지 확인
fn check_unique<T: Record>(records: &[T], candidate: &T) -> Result<(), StoreError> {
    for field in T::UNIQUE_FIELDS {
        let Some(value) = field_value(candidate, field) else {
            continue;
        };
        let taken = records
            .iter()
            .filter(|r| r.id() != candidate.id())
            .any(|r| field_matches(r, field, &value));
        if taken {
            return Err(StoreError::Conflict(field.to_string()));
        }
    }
    Ok(())
}

#[async_trait]
impl<T: Record> RecordStore<T> for MemoryStore<T> {
    async fn create(&self, record: T) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(StoreError::Conflict("_id".to_string()));
        }
        check_unique(&records, &record)?;
        records.push(record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<T, StoreError> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(StoreError::NotFound {
                collection: T::COLLECTION,
                id,
            })
    }

    async fn get_all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn update(&self, record: T) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        check_unique(&records, &record)?;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or(StoreError::NotFound {
                collection: T::COLLECTION,
                id: record.id(),
            })?;
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(StoreError::NotFound {
                collection: T::COLLECTION,
                id,
            });
        }
        Ok(())
    }

    async fn find_by(&self, field: &str, value: &str) -> Result<Vec<T>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| field_matches(*r, field, value))
            .cloned()
            .collect())
    }

    async fn find_one_by_any(&self, criteria: &[(&str, &str)]) -> Result<Option<T>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| criteria.iter().any(|(field, value)| field_matches(*r, field, value)))
            .cloned())
    }
}
