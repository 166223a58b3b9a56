//! # Authentication Configuration Module
//!
//! Discord OAuth 2.0 클라이언트 정보와 알림 웹훅 설정을 관리합니다.
//!
//! ## Discord Developer Portal 설정 가이드
//!
//! 1. [Discord Developer Portal](https://discord.com/developers/applications) 접속
//! 2. 애플리케이션 생성 또는 선택
//! 3. OAuth2 > General 에서 Client ID / Client Secret 확인
//! 4. Redirects 에 콜백 URI 추가: `https://yourdomain.com/callback`
//!
//! ## 보안 고려사항
//!
//! - `client_secret`은 로그에 출력하지 않습니다 (`Debug` 구현에서 마스킹)
//! - 프로덕션에서는 HTTPS redirect URI만 사용하세요

use std::env;
use std::fmt;
use std::time::Duration;

use crate::errors::errors::{AppError, AppResult};
use super::{optional, parsed, required};

/// Discord OAuth 2.0 클라이언트 설정
///
/// 토큰 엔드포인트, 사용자 정보 엔드포인트 URL은 기본값을 가지지만
/// 테스트나 프록시 환경을 위해 환경 변수로 덮어쓸 수 있습니다.
#[derive(Clone, PartialEq)]
pub struct DiscordOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub user_info_uri: String,
    pub scopes: String,
    /// 아웃바운드 호출 1회당 타임아웃
    pub http_timeout: Duration,
}

impl DiscordOAuthConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// ## 환경 변수
    /// - `DISCORD_CLIENT_ID`, `DISCORD_CLIENT_SECRET`, `DISCORD_REDIRECT_URI` (필수)
    /// - `DISCORD_AUTH_URI` (기본값: "https://discord.com/oauth2/authorize")
    /// - `DISCORD_TOKEN_URI` (기본값: "https://discord.com/api/oauth2/token")
    /// - `DISCORD_USER_INFO_URI` (기본값: "https://discord.com/api/v9/users/@me")
    /// - `DISCORD_SCOPES` (기본값: "identify email")
    /// - `OAUTH_HTTP_TIMEOUT_SECS` (기본값: 10)
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = parsed(&lookup, "OAUTH_HTTP_TIMEOUT_SECS", 10u64)?;
        if timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "OAUTH_HTTP_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            client_id: required(&lookup, "DISCORD_CLIENT_ID")?,
            client_secret: required(&lookup, "DISCORD_CLIENT_SECRET")?,
            redirect_uri: required(&lookup, "DISCORD_REDIRECT_URI")?,
            auth_uri: optional(&lookup, "DISCORD_AUTH_URI")
                .unwrap_or_else(|| "https://discord.com/oauth2/authorize".to_string()),
            token_uri: optional(&lookup, "DISCORD_TOKEN_URI")
                .unwrap_or_else(|| "https://discord.com/api/oauth2/token".to_string()),
            user_info_uri: optional(&lookup, "DISCORD_USER_INFO_URI")
                .unwrap_or_else(|| "https://discord.com/api/v9/users/@me".to_string()),
            scopes: optional(&lookup, "DISCORD_SCOPES")
                .unwrap_or_else(|| "identify email".to_string()),
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Discord 인증 페이지 URL을 생성합니다.
    ///
    /// `guild_id`가 주어지면 Discord 서버 선택 화면에 미리 선택되도록 함께 전달합니다.
    ///
    /// ```rust,ignore
    /// let url = config.authorize_url(Some("81384788765712384"));
    /// // https://discord.com/oauth2/authorize?client_id=...&redirect_uri=...&response_type=code&scope=identify%20email&guild_id=...
    /// ```
    pub fn authorize_url(&self, guild_id: Option<&str>) -> String {
        let mut params = vec![
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", self.scopes.as_str()),
        ];
        if let Some(guild_id) = guild_id {
            params.push(("guild_id", guild_id));
        }

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.auth_uri, query_string)
    }
}

impl fmt::Debug for DiscordOAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordOAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("redirect_uri", &self.redirect_uri)
            .field("auth_uri", &self.auth_uri)
            .field("token_uri", &self.token_uri)
            .field("user_info_uri", &self.user_info_uri)
            .field("scopes", &self.scopes)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

/// 인증 완료 알림 웹훅 설정
///
/// `WEBHOOK_URL`이 없으면 알림이 비활성화됩니다.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookConfig {
    pub url: Option<String>,
    pub http_timeout: Duration,
}

impl WebhookConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = parsed(&lookup, "OAUTH_HTTP_TIMEOUT_SECS", 10u64)?;

        Ok(Self {
            url: optional(&lookup, "WEBHOOK_URL"),
            http_timeout: Duration::from_secs(timeout_secs.max(1)),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }
}
