//! 콜백 요청관련 DTO
//!
//! Discord가 리디렉션하면서 붙여 주는 쿼리 파라미터를 매핑합니다.
use serde::Deserialize;
use validator::Validate;

use crate::utils::string_utils::deserialize_optional_string;

/// OAuth 콜백 쿼리 파라미터 구조체
///
/// `code`는 선택 필드로 받고, 누락 여부는 콜백 서비스가 `MissingCode`로 판정합니다.
/// 빈 문자열은 역직렬화 시점에 `None`으로 정리됩니다.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct OAuthCallbackQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 512, message = "Authorization code가 너무 깁니다"))]
    pub code: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 64, message = "guild_id가 너무 깁니다"))]
    pub guild_id: Option<String>,

    /// 에러가 있을 경우 (사용자가 거부했거나 에러 발생)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub error_description: Option<String>,
}

/// 로그인 시작 쿼리 파라미터 구조체
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 64, message = "guild_id가 너무 깁니다"))]
    pub guild_id: Option<String>,
}
