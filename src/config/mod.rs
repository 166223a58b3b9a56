//! # Configuration Module
//!
//! 서비스 설정을 관리하는 모듈입니다.
//! 모든 설정값은 프로세스 시작 시점에 환경 변수에서 **한 번만** 읽혀
//! 타입이 있는 구조체로 변환되고, 이후 각 컴포넌트에 주입됩니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버 바인딩, MongoDB, 저장소 백엔드 설정
//! - [`auth_config`] - Discord OAuth, 웹훅, 아웃바운드 HTTP 타임아웃 설정
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! export DISCORD_CLIENT_ID="123456789012345678"
//! export DISCORD_CLIENT_SECRET="your-client-secret"
//! export DISCORD_REDIRECT_URI="https://yourdomain.com/callback"
//! ```
//!
//! ## 선택적 환경 변수
//!
//! ```bash
//! export WEBHOOK_URL="https://discord.com/api/webhooks/..."
//! export MONGO_URI="mongodb://localhost:27017"
//! export STORE_BACKEND="mongodb"      # mongodb | memory
//! export OAUTH_HTTP_TIMEOUT_SECS="10"
//! export PORT="10000"
//! ```
//!
//! ## 테스트
//!
//! 모든 설정 구조체는 `from_lookup` 생성자를 제공합니다.
//! 프로세스 환경 변수를 건드리지 않고 `HashMap` 등으로 설정을 주입할 수 있습니다.
//!
//! ```rust,ignore
//! let vars = HashMap::from([("PORT", "9000")]);
//! let server = ServerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()))?;
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

use crate::errors::errors::{AppError, AppResult};

/// 필수 설정값을 읽습니다. 비어 있으면 누락으로 취급합니다.
pub(crate) fn required<F>(lookup: &F, key: &str) -> AppResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or_else(|| AppError::ConfigError(format!("{} must be set", key)))
}

/// 선택 설정값을 읽습니다. 공백만 있는 값은 `None`으로 취급합니다.
pub(crate) fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 숫자 설정값을 읽습니다. 값이 없으면 기본값을, 파싱에 실패하면 에러를 반환합니다.
pub(crate) fn parsed<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match optional(lookup, key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| AppError::ConfigError(format!("{} 파싱 실패 ({}): {}", key, raw, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;

    /// 테스트용 설정 조회 클로저를 만듭니다.
    pub fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }
}
