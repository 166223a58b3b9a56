//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 선택 문자열 정리, 비밀값 마스킹

pub mod string_utils;
