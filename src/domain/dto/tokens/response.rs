//! Discord OAuth 토큰 응답 DTO
//!
//! Authorization Code를 Access Token으로 교환할 때 Discord가 반환하는 데이터입니다.
//! `access_token`이 없는 응답은 실패한 교환으로 취급하며, 일부 필드만 사용하는 일은 없습니다.

use serde::Deserialize;

use crate::errors::errors::ExchangeError;

/// `expires_in`이 없을 때 사용하는 토큰 수명 (7일)
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 604_800;

/// Discord OAuth 2.0 토큰 교환 응답
#[derive(Debug, Clone, PartialEq)]
pub struct DiscordTokenResponse {
    /// 액세스 토큰 (항상 비어 있지 않음)
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// 토큰 타입 (보통 "Bearer")
    pub token_type: Option<String>,
    /// 부여된 권한 범위 (공백 구분)
    pub scope: Option<String>,
    /// 토큰 만료 시간 (초 단위)
    pub expires_in: Option<i64>,
}

/// 토큰 엔드포인트 응답 본문 그대로의 형태
#[derive(Debug, Deserialize)]
struct TokenResponseBody {
    access_token: Option<String>,
    refresh_token: Option<String>,
    token_type: Option<String>,
    scope: Option<String>,
    expires_in: Option<i64>,
}

impl DiscordTokenResponse {
    /// 토큰 엔드포인트 응답 본문을 파싱합니다.
    ///
    /// # Errors
    ///
    /// * `ExchangeError::TokenRejected` - JSON이 아니거나 `access_token`이 없거나 비어 있는 경우
    pub fn from_body(body: &str) -> Result<Self, ExchangeError> {
        let parsed: TokenResponseBody = serde_json::from_str(body).map_err(|e| {
            ExchangeError::TokenRejected(format!("토큰 응답 파싱 실패: {}", e))
        })?;

        let access_token = parsed
            .access_token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                ExchangeError::TokenRejected("응답에 access_token이 없습니다".to_string())
            })?;

        Ok(Self {
            access_token,
            refresh_token: parsed.refresh_token,
            token_type: parsed.token_type,
            scope: parsed.scope,
            expires_in: parsed.expires_in,
        })
    }

    /// 만료까지 남은 초. 응답에 없거나 음수면 기본값을 사용합니다.
    pub fn lifetime_secs(&self) -> i64 {
        self.expires_in
            .filter(|secs| *secs >= 0)
            .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS)
    }
}
