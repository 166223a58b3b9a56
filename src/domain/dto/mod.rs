//! DTO (Data Transfer Object) 모듈

pub mod callback;
pub mod tokens;

pub use callback::*;
pub use tokens::*;
