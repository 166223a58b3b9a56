//! # Discord 웹훅 알림
//!
//! 새 인증이 저장되면 Discord 채널 웹훅으로 임베드 메시지를 보냅니다.
//!
//! ```json
//! {
//!   "embeds": [{
//!     "title": "🔐 New Authorization",
//!     "color": 2829617,
//!     "fields": [
//!       { "name": "👤 User",  "value": "alice (`42`)",      "inline": true },
//!       { "name": "📧 Email", "value": "alice@example.com", "inline": true }
//!     ],
//!     "thumbnail": { "url": "https://cdn.discordapp.com/avatars/42/<hash>.png" },
//!     "timestamp": "2026-10-16T09:00:00+00:00",
//!     "footer": { "text": "🎡 Discord auth service" }
//!   }]
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde_json::{Value, json};

use crate::config::WebhookConfig;
use crate::domain::models::oauth::discord_user::DiscordUser;
use crate::errors::errors::{AppError, NotifyError};

/// 임베드 사이드바 색상 (#2b2d31)
const EMBED_COLOR: u32 = 0x2b2d31;

const EMBED_FOOTER: &str = "🎡 Discord auth service";

#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn notify(&self, profile: &DiscordUser) -> Result<(), NotifyError>;
}

pub struct DiscordWebhookNotifier {
    http: reqwest::Client,
    config: WebhookConfig,
}

impl DiscordWebhookNotifier {
    pub fn new(config: WebhookConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { http, config })
    }
}

/// 웹훅 요청 본문을 만듭니다.
pub fn build_embed_payload(profile: &DiscordUser, now: DateTime<Utc>) -> Value {
    let mut payload = json!({
        "embeds": [{
            "title": "🔐 New Authorization",
            "color": EMBED_COLOR,
            "fields": [
                {
                    "name": "👤 User",
                    "value": format!("{} (`{}`)", profile.username, profile.id),
                    "inline": true
                },
                {
                    "name": "📧 Email",
                    "value": profile.email.as_deref().unwrap_or("Not provided"),
                    "inline": true
                }
            ],
            "timestamp": now.to_rfc3339(),
            "footer": { "text": EMBED_FOOTER }
        }]
    });

    // 아바타가 없는 사용자는 썸네일 생략
    if let Some(avatar_url) = profile.avatar_url() {
        payload["embeds"][0]["thumbnail"] = json!({ "url": avatar_url });
    }

    payload
}

#[async_trait]
impl Notifier for DiscordWebhookNotifier {
    async fn notify(&self, profile: &DiscordUser) -> Result<(), NotifyError> {
        let Some(url) = self.config.url.as_deref() else {
            debug!("WEBHOOK_URL 미설정 - 알림 생략: {}", profile.id);
            return Ok(());
        };

        let payload = build_embed_payload(profile, Utc::now());

        let response = self.http
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(status.as_u16()));
        }

        info!("웹훅 전송 완료 - user: {} ({})", profile.username, profile.id);
        Ok(())
    }
}
