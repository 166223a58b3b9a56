//! Identity Record Entity
//!
//! 인증을 완료한 Discord 사용자 한 명의 영속 표현입니다.
//! MongoDB에서는 Discord 사용자 ID를 `_id`로 사용하는 문서 하나에 대응합니다.
//!
//! ## 수명 주기
//!
//! - 해당 `id`의 첫 콜백 성공 시 생성
//! - 이후 콜백 성공 시마다 전체 필드를 덮어씀 (last-write-wins)
//! - 단, `auth_date`는 최초 생성 시각을 유지하고 `last_refresh`만 갱신
//! - 삭제 경로 없음

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::domain::dto::tokens::response::DiscordTokenResponse;
use crate::domain::models::oauth::discord_user::DiscordUser;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Discord 사용자 ID (기본 키)
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    /// 액세스 토큰 만료 시각
    pub expires_at: DateTime,
    pub guild_id: Option<String>,
    /// 최초 인증 시각 (upsert 시 보존)
    pub auth_date: DateTime,
    /// 마지막 인증 시각
    pub last_refresh: DateTime,
}

impl IdentityRecord {
    /// 토큰 교환 결과와 프로필로 레코드를 만듭니다.
    ///
    /// `auth_date`와 `last_refresh`는 모두 `now`로 채워지며,
    /// 기존 레코드가 있으면 저장소가 `auth_date`를 기존 값으로 유지합니다.
    pub fn from_exchange(
        token: DiscordTokenResponse,
        profile: &DiscordUser,
        guild_id: Option<String>,
        now: DateTime,
    ) -> Self {
        let lifetime_millis = token.lifetime_secs().saturating_mul(1000);
        let expires_at = DateTime::from_millis(now.timestamp_millis().saturating_add(lifetime_millis));

        Self {
            id: profile.id.clone(),
            username: profile.username.clone(),
            email: profile.email.clone(),
            avatar: profile.avatar.clone(),
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            token_type: token.token_type,
            scope: token.scope,
            expires_at,
            guild_id: guild_id.filter(|g| !g.trim().is_empty()),
            auth_date: now,
            last_refresh: now,
        }
    }

    /// 기존 레코드의 최초 인증 시각을 이어받은 레코드를 반환합니다.
    pub fn preserving_auth_date(mut self, existing: &IdentityRecord) -> Self {
        self.auth_date = existing.auth_date;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> DiscordUser {
        DiscordUser {
            id: "42".to_string(),
            username: "alice".to_string(),
            email: None,
            avatar: Some("hash".to_string()),
        }
    }

    #[test]
    fn test_from_exchange_copies_token_and_profile() {
        let token = DiscordTokenResponse::from_body(
            r#"{"access_token": "tok1", "refresh_token": "ref1", "token_type": "Bearer", "scope": "identify", "expires_in": 3600}"#,
        )
        .unwrap();
        let now = DateTime::from_millis(1_700_000_000_000);

        let record = IdentityRecord::from_exchange(token, &profile(), Some("7".to_string()), now);

        assert_eq!(record.id, "42");
        assert_eq!(record.username, "alice");
        assert_eq!(record.access_token, "tok1");
        assert_eq!(record.refresh_token.as_deref(), Some("ref1"));
        assert_eq!(record.guild_id.as_deref(), Some("7"));
        assert_eq!(record.auth_date, now);
        assert_eq!(record.last_refresh, now);
        assert_eq!(record.expires_at.timestamp_millis(), 1_700_000_000_000 + 3_600_000);
    }

    #[test]
    fn test_from_exchange_defaults_expiry_and_blank_guild() {
        let token = DiscordTokenResponse::from_body(r#"{"access_token": "tok1"}"#).unwrap();
        let now = DateTime::from_millis(0);

        let record = IdentityRecord::from_exchange(token, &profile(), Some(" ".to_string()), now);

        assert_eq!(record.guild_id, None);
        assert_eq!(record.expires_at.timestamp_millis(), 604_800_000);
    }

    #[test]
    fn test_serializes_id_as_mongo_key() {
        let token = DiscordTokenResponse::from_body(r#"{"access_token": "tok1"}"#).unwrap();
        let record = IdentityRecord::from_exchange(token, &profile(), None, DateTime::from_millis(0));

        let document = mongodb::bson::to_document(&record).unwrap();
        assert_eq!(document.get_str("_id").unwrap(), "42");
        assert!(document.contains_key("guild_id"));
        assert!(!document.contains_key("id"));
    }
}
