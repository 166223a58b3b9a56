//! Discord OAuth 인증 서비스 모듈
//!
//! Authorization Code를 Discord 프로필로 교환하는 클라이언트와,
//! 교환 → 저장 → 알림 순서로 콜백 트랜잭션을 진행하는 서비스를 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{CallbackService, DiscordOAuthClient};
//!
//! let exchange = Arc::new(DiscordOAuthClient::new(oauth_config)?);
//! let service = CallbackService::new(exchange, store, notifier);
//! let record = service.handle(query).await?;
//! ```

pub mod discord_oauth_client;
pub mod callback_service;

pub use discord_oauth_client::*;
pub use callback_service::*;
