//! 외부 프로바이더 모델

pub mod oauth;

pub use oauth::*;
