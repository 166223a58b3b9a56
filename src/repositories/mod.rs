//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 저장소 구현체는 `main`에서 명시적으로 생성되어 서비스에 주입됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::identities::{IdentityStore, InMemoryIdentityStore};
//!
//! let store: Arc<dyn IdentityStore> = Arc::new(InMemoryIdentityStore::new());
//! let record = store.get("80351110224678912").await?;
//! ```

pub mod identities;
