//! Discord 인증 콜백 서비스
//!
//! Discord OAuth 2.0 Authorization Code 리디렉션을 받아 코드를 토큰과 프로필로 교환하고,
//! 사용자 ID를 키로 Identity 레코드를 upsert한 뒤 웹훅으로 알림을 보냅니다.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /, /health, /login, /callback
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 쿼리 추출, HTML 응답
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐      ┌──────────────────┐
//! │ CallbackService │ ───▶ │ Discord / Webhook│ ← reqwest
//! └─────────────────┘      └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  IdentityStore  │ ← MongoDB 또는 메모리
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use discord_auth_service::services::auth::CallbackService;
//!
//! let service = CallbackService::new(exchange, store, notifier);
//! let record = service.handle(query).await?;
//! println!("{} 인증 완료", record.username);
//! ```

pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
