//! # HTTP Request Handlers Module
//!
//! 브라우저가 직접 접근하는 엔드포인트를 처리하는 핸들러 모음입니다.
//! 핸들러는 요청을 DTO로 추출해 서비스에 넘기고, 결과를 HTTP 응답으로 바꾸는 일만 합니다.
//!
//! ```text
//! Browser ──▶ handlers::callback ──▶ CallbackService ──▶ Exchange / Store / Notifier
//!         ◀── HTML 페이지 ◀─────────── Result<IdentityRecord, CallbackError>
//! ```
//!
//! - **`callback`**: `/`, `/login`, `/callback` 엔드포인트
//! - **`pages`**: 성공/실패 HTML 렌더링

pub mod callback;
pub mod pages;
