//! 인증 사용자(Identity) 저장소
//!
//! 콜백 서비스는 [`IdentityStore`] 트레이트에만 의존하며,
//! 실제 백엔드는 `main`에서 설정에 따라 골라 주입합니다.
//!
//! - [`identity_repo::MongoIdentityRepository`] - MongoDB 컬렉션 (운영)
//! - [`memory_repo::InMemoryIdentityStore`] - `DashMap` 기반 (로컬 실행/테스트)
//!
//! # 계약
//!
//! - `upsert`는 키 단위로 원자적이어야 합니다. 같은 `id`에 대한 동시 upsert가
//!   서로 섞인 레코드를 만들어서는 안 됩니다.
//! - 서로 다른 `id`에 대한 쓰기는 완전히 독립적입니다.
//! - 기존 레코드가 있으면 `auth_date`를 제외한 모든 필드를 덮어씁니다.

use async_trait::async_trait;

use crate::domain::entities::identities::identity_record::IdentityRecord;
use crate::errors::errors::StoreError;

pub mod identity_repo;
pub mod memory_repo;

pub use identity_repo::MongoIdentityRepository;
pub use memory_repo::InMemoryIdentityStore;

#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// 키로 레코드를 조회합니다.
    async fn get(&self, id: &str) -> Result<Option<IdentityRecord>, StoreError>;

    /// 키가 없으면 삽입, 있으면 `auth_date`를 보존한 채 전체를 교체합니다.
    ///
    /// 쓰기 직후 저장소에 남은 레코드를 반환합니다. 재인증이면 `auth_date`는
    /// 인자로 받은 값이 아니라 최초 삽입 시각입니다.
    async fn upsert(&self, record: IdentityRecord) -> Result<IdentityRecord, StoreError>;

    /// 헬스체크/로그에 노출할 백엔드 이름
    fn backend_name(&self) -> &'static str;
}
