//! 메모리 기반 Identity 저장소
//!
//! `DashMap`의 엔트리 잠금으로 키 단위 원자성을 보장합니다.
//! 프로세스가 종료되면 모든 레코드가 사라지므로 로컬 실행과 테스트 용도입니다.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::identities::identity_record::IdentityRecord;
use crate::errors::errors::StoreError;
use super::IdentityStore;

#[derive(Default)]
pub struct InMemoryIdentityStore {
    records: DashMap<String, IdentityRecord>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn get(&self, id: &str) -> Result<Option<IdentityRecord>, StoreError> {
        Ok(self.records.get(id).map(|entry| entry.value().clone()))
    }

    async fn upsert(&self, record: IdentityRecord) -> Result<IdentityRecord, StoreError> {
        let stored = match self.records.entry(record.id.clone()) {
            Entry::Occupied(mut occupied) => {
                let replacement = record.preserving_auth_date(occupied.get());
                occupied.insert(replacement.clone());
                replacement
            }
            Entry::Vacant(vacant) => {
                vacant.insert(record.clone());
                record
            }
        };
        Ok(stored)
    }

    fn backend_name(&self) -> &'static str {
        "In-Memory"
    }
}
