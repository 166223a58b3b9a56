//! # Domain Layer
//!
//! 콜백 트랜잭션에서 오가는 데이터 타입을 정의합니다.
//!
//! - [`dto`] - 인바운드 쿼리 파라미터, 프로바이더 토큰 응답
//! - [`models`] - 프로바이더가 반환하는 사용자 프로필
//! - [`entities`] - 영속화되는 `IdentityRecord`

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
