//! # Discord OAuth 2.0 교환 클라이언트
//!
//! Authorization Code Flow의 서버 측 두 단계를 수행합니다.
//!
//! ```text
//! ┌─────────────┐   1. POST /oauth2/token (form)    ┌─────────────────┐
//! │  우리 서버   │ ────────────────────────────────▶ │  Discord OAuth  │
//! │             │ ◀──────── access_token ────────── │                 │
//! │             │   2. GET /users/@me (Bearer)      │                 │
//! │             │ ────────────────────────────────▶ │                 │
//! │             │ ◀──────── user profile ────────── │                 │
//! └─────────────┘                                   └─────────────────┘
//! ```
//!
//! - 두 호출 모두 재시도하지 않습니다 (Authorization Code는 일회용)
//! - 공유 커넥션 풀(`reqwest::Client`)을 사용하며, 호출마다 설정된 타임아웃이 적용됩니다
//! - 타임아웃/연결 실패는 `ExchangeError::Network`로 구분됩니다

use async_trait::async_trait;
use log::{debug, warn};

use crate::config::DiscordOAuthConfig;
use crate::domain::dto::tokens::response::DiscordTokenResponse;
use crate::domain::models::oauth::discord_user::DiscordUser;
use crate::errors::errors::{AppError, ExchangeError};
use crate::utils::string_utils::mask_secret;

/// 에러 메시지에 포함할 응답 본문 최대 길이
const MAX_ERROR_BODY_CHARS: usize = 256;

/// 코드 → (토큰, 프로필) 교환 계약
///
/// 콜백 서비스는 이 트레이트에만 의존하므로 테스트에서 가짜 구현으로 교체할 수 있습니다.
#[async_trait]
pub trait OAuthExchange: Send + Sync + 'static {
    async fn exchange(
        &self,
        code: &str,
        guild_id: Option<&str>,
    ) -> Result<(DiscordTokenResponse, DiscordUser), ExchangeError>;
}

/// Discord API를 호출하는 `OAuthExchange` 구현체
pub struct DiscordOAuthClient {
    http: reqwest::Client,
    config: DiscordOAuthConfig,
}

impl DiscordOAuthClient {
    /// 설정된 타임아웃을 가진 HTTP 클라이언트를 생성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - TLS 백엔드 초기화 실패 등으로 클라이언트 생성이 불가능한 경우
    pub fn new(config: DiscordOAuthConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Authorization code를 액세스 토큰으로 교환합니다.
    async fn exchange_code_for_token(&self, code: &str) -> Result<DiscordTokenResponse, ExchangeError> {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        let response = self.http
            .post(&self.config.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| ExchangeError::Network(format!("Discord 토큰 요청 실패: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::Network(format!("Discord 토큰 응답 수신 실패: {}", e)))?;

        if !status.is_success() {
            return Err(ExchangeError::TokenRejected(format!(
                "Discord 토큰 교환 실패 ({}): {}",
                status,
                truncate(&body)
            )));
        }

        DiscordTokenResponse::from_body(&body)
    }

    /// 액세스 토큰으로 현재 사용자 정보를 조회합니다.
    async fn get_user_info(&self, access_token: &str) -> Result<DiscordUser, ExchangeError> {
        let response = self.http
            .get(&self.config.user_info_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ExchangeError::Network(format!("Discord 사용자 정보 요청 실패: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::Network(format!("Discord 사용자 정보 수신 실패: {}", e)))?;

        if !status.is_success() {
            return Err(ExchangeError::ProfileFetchFailed(format!(
                "Discord 사용자 정보 조회 실패 ({}): {}",
                status,
                truncate(&body)
            )));
        }

        let user: DiscordUser = serde_json::from_str(&body).map_err(|e| {
            ExchangeError::ProfileFetchFailed(format!("Discord 사용자 정보 파싱 실패: {}", e))
        })?;

        if !user.has_valid_id() {
            return Err(ExchangeError::ProfileFetchFailed(
                "Discord 사용자 정보에 id가 없습니다".to_string(),
            ));
        }

        Ok(user)
    }
}

#[async_trait]
impl OAuthExchange for DiscordOAuthClient {
    async fn exchange(
        &self,
        code: &str,
        guild_id: Option<&str>,
    ) -> Result<(DiscordTokenResponse, DiscordUser), ExchangeError> {
        debug!(
            "Discord 코드 교환 시작 - code: {}, guild: {}",
            mask_secret(code),
            guild_id.unwrap_or("-")
        );

        let token = self.exchange_code_for_token(code).await.inspect_err(|e| {
            warn!("Discord 토큰 교환 실패: {}", e);
        })?;

        let user = self.get_user_info(&token.access_token).await.inspect_err(|e| {
            warn!("Discord 사용자 정보 조회 실패 - token: {}, 에러: {}", mask_secret(&token.access_token), e);
        })?;

        debug!("Discord 코드 교환 완료 - user: {} ({})", user.username, user.id);
        Ok((token, user))
    }
}

fn truncate(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        body.to_string()
    } else {
        let head: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::time::Duration;

    const TOKEN_PATH: &str = "/api/oauth2/token";
    const PROFILE_PATH: &str = "/api/v9/users/@me";

    fn config_for(base_url: &str) -> DiscordOAuthConfig {
        DiscordOAuthConfig {
            client_id: "1234".to_string(),
            client_secret: "shh".to_string(),
            redirect_uri: "http://localhost:10000/callback".to_string(),
            auth_uri: format!("{}/oauth2/authorize", base_url),
            token_uri: format!("{}{}", base_url, TOKEN_PATH),
            user_info_uri: format!("{}{}", base_url, PROFILE_PATH),
            scopes: "identify email".to_string(),
            http_timeout: Duration::from_secs(5),
        }
    }

    #[actix_web::test]
    async fn test_exchange_success() {
        let mut server = Server::new_async().await;
        let token_mock = server
            .mock("POST", TOKEN_PATH)
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("code".into(), "abc123".into()),
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                Matcher::UrlEncoded("client_id".into(), "1234".into()),
                Matcher::UrlEncoded("client_secret".into(), "shh".into()),
                Matcher::UrlEncoded("redirect_uri".into(), "http://localhost:10000/callback".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "tok1", "token_type": "Bearer", "expires_in": 604800, "scope": "identify"}"#)
            .expect(1)
            .create_async()
            .await;
        let profile_mock = server
            .mock("GET", PROFILE_PATH)
            .match_header("authorization", "Bearer tok1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "42", "username": "alice", "email": "alice@example.com"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = DiscordOAuthClient::new(config_for(&server.url())).unwrap();
        let (token, user) = client.exchange("abc123", Some("7")).await.unwrap();

        assert_eq!(token.access_token, "tok1");
        assert_eq!(user.id, "42");
        assert_eq!(user.username, "alice");
        assert_eq!(user.email.as_deref(), Some("alice@example.com"));
        token_mock.assert_async().await;
        profile_mock.assert_async().await;
    }

    #[actix_web::test]
    async fn test_body_without_access_token_is_rejected_before_profile_call() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", TOKEN_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token_type": "Bearer"}"#)
            .create_async()
            .await;
        let profile_mock = server
            .mock("GET", PROFILE_PATH)
            .expect(0)
            .create_async()
            .await;

        let client = DiscordOAuthClient::new(config_for(&server.url())).unwrap();
        let result = client.exchange("abc123", None).await;

        assert!(matches!(result, Err(ExchangeError::TokenRejected(_))));
        profile_mock.assert_async().await;
    }

    #[actix_web::test]
    async fn test_non_success_token_status_is_rejected() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", TOKEN_PATH)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "invalid_grant"}"#)
            .create_async()
            .await;

        let client = DiscordOAuthClient::new(config_for(&server.url())).unwrap();
        let result = client.exchange("used-code", None).await;

        match result {
            Err(ExchangeError::TokenRejected(msg)) => assert!(msg.contains("invalid_grant")),
            other => panic!("Expected TokenRejected, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_profile_unauthorized_is_profile_fetch_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", TOKEN_PATH)
            .with_status(200)
            .with_body(r#"{"access_token": "tok1"}"#)
            .create_async()
            .await;
        server
            .mock("GET", PROFILE_PATH)
            .with_status(401)
            .with_body(r#"{"message": "401: Unauthorized", "code": 0}"#)
            .create_async()
            .await;

        let client = DiscordOAuthClient::new(config_for(&server.url())).unwrap();
        let result = client.exchange("abc123", None).await;

        assert!(matches!(result, Err(ExchangeError::ProfileFetchFailed(_))));
    }

    #[actix_web::test]
    async fn test_unparsable_profile_is_profile_fetch_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", TOKEN_PATH)
            .with_status(200)
            .with_body(r#"{"access_token": "tok1"}"#)
            .create_async()
            .await;
        server
            .mock("GET", PROFILE_PATH)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = DiscordOAuthClient::new(config_for(&server.url())).unwrap();
        let result = client.exchange("abc123", None).await;

        assert!(matches!(result, Err(ExchangeError::ProfileFetchFailed(_))));
    }

    #[actix_web::test]
    async fn test_unreachable_provider_is_network_error() {
        // 포트 1은 열려 있지 않으므로 연결이 즉시 거부됨
        let client = DiscordOAuthClient::new(config_for("http://127.0.0.1:1")).unwrap();
        let result = client.exchange("abc123", None).await;

        assert!(matches!(result, Err(ExchangeError::Network(_))));
    }

    #[test]
    fn test_truncate_long_body() {
        let body = "x".repeat(MAX_ERROR_BODY_CHARS + 10);
        let truncated = truncate(&body);

        assert_eq!(truncated.chars().count(), MAX_ERROR_BODY_CHARS + 1);
        assert!(truncated.ends_with('…'));
    }
}
