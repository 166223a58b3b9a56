//! # Discord 사용자 정보 모델
//!
//! `GET /users/@me` 응답에서 이 서비스가 사용하는 필드만 매핑합니다.
//!
//! ```json
//! {
//!   "id": "80351110224678912",
//!   "username": "nelly",
//!   "avatar": "8342729096ea3675442027381ff50dfe",
//!   "email": "nelly@discord.com"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::utils::string_utils::deserialize_optional_string;

/// Discord가 반환한 인증 사용자 프로필
///
/// `id`는 Discord snowflake 문자열이며 `IdentityRecord`의 기본 키가 됩니다.
/// `email`은 `email` 스코프가 없으면 내려오지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscordUser {
    pub id: String,

    pub username: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,

    /// 아바타 해시 (CDN 경로 조합용)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub avatar: Option<String>,
}

impl DiscordUser {
    /// 프로필 응답 본문이 식별자로 쓸 수 있는 `id`를 가지고 있는지 확인합니다.
    pub fn has_valid_id(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// 아바타 CDN URL
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar
            .as_ref()
            .map(|hash| format!("https://cdn.discordapp.com/avatars/{}/{}.png", self.id, hash))
    }
}
