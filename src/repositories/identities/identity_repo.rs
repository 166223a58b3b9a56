//! # Identity 리포지토리 구현 (MongoDB)
//!
//! Discord 사용자 ID를 `_id`로 쓰는 문서 하나가 `IdentityRecord` 하나에 대응합니다.
//!
//! ## Upsert 전략
//!
//! 단일 `find_one_and_update(upsert: true, returnDocument: After)` 호출로 처리합니다.
//! MongoDB의 단일 문서 쓰기는 원자적이므로 별도 잠금이 필요 없고,
//! 반환되는 문서는 `$setOnInsert`가 반영된 저장 결과입니다.
//!
//! ```text
//! filter: { _id: <id> }
//! update: {
//!   $set:         { username, email, ..., last_refresh },   // 매번 덮어씀
//!   $setOnInsert: { auth_date }                             // 최초 삽입 시에만
//! }
//! ```
//!
//! ## 인덱스
//!
//! - `_id` (기본 유니크 인덱스)
//! - `guild_id` (서버별 조회용)
//! - `last_refresh` (최근 인증 순 조회용)

use async_trait::async_trait;
use log::{debug, error};
use mongodb::{
    Collection, IndexModel,
    bson::{self, Document, doc},
    error::{ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
};

use crate::db::Database;
use crate::domain::entities::identities::identity_record::IdentityRecord;
use crate::errors::errors::{AppError, StoreError};
use super::IdentityStore;

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

pub struct MongoIdentityRepository {
    collection: Collection<IdentityRecord>,
}

impl MongoIdentityRepository {
    pub fn new(database: &Database, collection_name: &str) -> Self {
        Self {
            collection: database.get_database().collection::<IdentityRecord>(collection_name),
        }
    }

    /// 조회용 보조 인덱스를 생성합니다. 이미 존재하면 아무 일도 하지 않습니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let guild_index = IndexModel::builder()
            .keys(doc! { "guild_id": 1 })
            .options(IndexOptions::builder()
                .name("guild_id_asc".to_string())
                .build())
            .build();

        let last_refresh_index = IndexModel::builder()
            .keys(doc! { "last_refresh": -1 })
            .options(IndexOptions::builder()
                .name("last_refresh_desc".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([guild_index, last_refresh_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

/// upsert에 사용할 update 문서를 만듭니다.
fn upsert_update(record: &IdentityRecord) -> Result<Document, StoreError> {
    let mut fields = bson::to_document(record).map_err(|e| {
        StoreError::ConstraintViolation(format!("레코드 직렬화 실패: {}", e))
    })?;

    // _id는 filter로, auth_date는 $setOnInsert로만 기록
    fields.remove("_id");
    fields.remove("auth_date");

    Ok(doc! {
        "$set": fields,
        "$setOnInsert": { "auth_date": record.auth_date },
    })
}

fn map_mongo_error(e: mongodb::error::Error) -> StoreError {
    // findAndModify는 중복 키를 커맨드 에러로, update/insert는 쓰기 에러로 보고함
    let code = match e.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => Some(write_error.code),
        ErrorKind::Command(command_error) => Some(command_error.code),
        _ => None,
    };
    classify_error_code(code, e.to_string())
}

fn classify_error_code(code: Option<i32>, message: String) -> StoreError {
    match code {
        Some(DUPLICATE_KEY_CODE) => StoreError::ConstraintViolation(message),
        _ => StoreError::Unavailable(message),
    }
}

#[async_trait]
impl IdentityStore for MongoIdentityRepository {
    async fn get(&self, id: &str) -> Result<Option<IdentityRecord>, StoreError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(map_mongo_error)
    }

    async fn upsert(&self, record: IdentityRecord) -> Result<IdentityRecord, StoreError> {
        let update = upsert_update(&record)?;

        let stored = self.collection
            .find_one_and_update(doc! { "_id": record.id.as_str() }, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| {
                error!("Identity upsert 실패 - id: {}, 에러: {}", record.id, e);
                map_mongo_error(e)
            })?
            .ok_or_else(|| {
                StoreError::Unavailable(format!("upsert 후 문서를 찾을 수 없습니다: {}", record.id))
            })?;

        debug!(
            "Identity upsert 완료 - id: {}, 신규: {}",
            stored.id,
            stored.auth_date == record.auth_date
        );
        Ok(stored)
    }

    fn backend_name(&self) -> &'static str {
        "MongoDB"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::DateTime;

    fn record() -> IdentityRecord {
        IdentityRecord {
            id: "42".to_string(),
            username: "alice".to_string(),
            email: None,
            avatar: None,
            access_token: "tok1".to_string(),
            refresh_token: None,
            token_type: Some("Bearer".to_string()),
            scope: None,
            expires_at: DateTime::from_millis(2_000),
            guild_id: None,
            auth_date: DateTime::from_millis(1_000),
            last_refresh: DateTime::from_millis(1_000),
        }
    }

    #[test]
    fn test_upsert_update_sets_everything_but_key_and_auth_date() {
        let update = upsert_update(&record()).unwrap();

        let set = update.get_document("$set").unwrap();
        assert!(!set.contains_key("_id"));
        assert!(!set.contains_key("auth_date"));
        assert_eq!(set.get_str("username").unwrap(), "alice");
        assert_eq!(set.get_str("access_token").unwrap(), "tok1");
        assert!(set.contains_key("last_refresh"));
        // None 필드도 null로 덮어써야 이전 값이 남지 않음
        assert!(set.contains_key("refresh_token"));
        assert!(set.contains_key("email"));
    }

    #[test]
    fn test_upsert_update_sets_auth_date_only_on_insert() {
        let update = upsert_update(&record()).unwrap();

        let on_insert = update.get_document("$setOnInsert").unwrap();
        assert_eq!(on_insert.len(), 1);
        assert_eq!(on_insert.get_datetime("auth_date").unwrap(), &DateTime::from_millis(1_000));
    }

    #[test]
    fn test_duplicate_key_code_is_constraint_violation() {
        let error = classify_error_code(Some(DUPLICATE_KEY_CODE), "E11000 duplicate key".to_string());

        assert_eq!(error, StoreError::ConstraintViolation("E11000 duplicate key".to_string()));
    }

    #[test]
    fn test_other_codes_are_unavailable() {
        // 91: ShutdownInProgress
        assert!(matches!(
            classify_error_code(Some(91), "shutting down".to_string()),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            classify_error_code(None, "server selection timeout".to_string()),
            StoreError::Unavailable(_)
        ));
    }
}
