//! # OAuth 콜백 처리 서비스
//!
//! 콜백 요청 하나를 단일 패스 상태 머신으로 처리합니다.
//!
//! ```text
//! Received ──▶ Exchanging ──▶ Persisting ──▶ Notifying ──▶ Succeeded
//!    │             │              │
//!    └─────────────┴──────────────┴──────▶ Failed(reason)
//! ```
//!
//! - `Received`: `code`가 없으면 외부 호출 없이 `MissingCode`
//! - `Exchanging`: 토큰 교환 + 프로필 조회, 실패 시 `Exchange(..)`
//! - `Persisting`: `IdentityRecord` upsert, 실패 시 `Store(..)`
//! - `Notifying`: 결과와 무관하게 `Succeeded`로 진행
//!
//! 재시도, 재개, 중간 상태 저장은 없습니다. 요청마다 새 상태 머신이 만들어지고
//! 종료와 함께 버려집니다.

use std::fmt;
use std::sync::Arc;

use log::{info, warn};
use mongodb::bson::DateTime;
use uuid::Uuid;
use validator::Validate;

use crate::domain::dto::callback::request::OAuthCallbackQuery;
use crate::domain::entities::identities::identity_record::IdentityRecord;
use crate::errors::errors::CallbackError;
use crate::repositories::identities::IdentityStore;
use crate::services::auth::discord_oauth_client::OAuthExchange;
use crate::services::notify::webhook_notifier::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackState {
    Received,
    Exchanging,
    Persisting,
    Notifying,
    Succeeded,
    Failed,
}

impl fmt::Display for CallbackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallbackState::Received => "Received",
            CallbackState::Exchanging => "Exchanging",
            CallbackState::Persisting => "Persisting",
            CallbackState::Notifying => "Notifying",
            CallbackState::Succeeded => "Succeeded",
            CallbackState::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// 요청 하나의 진행 상태. 상태 전이를 로그로 남깁니다.
struct CallbackRun {
    request_id: Uuid,
    state: CallbackState,
}

impl CallbackRun {
    fn start() -> Self {
        let run = Self {
            request_id: Uuid::new_v4(),
            state: CallbackState::Received,
        };
        info!("[{}] 콜백 수신 → {}", run.request_id, run.state);
        run
    }

    fn advance(&mut self, next: CallbackState) {
        info!("[{}] {} → {}", self.request_id, self.state, next);
        self.state = next;
    }

    fn fail(&mut self, error: CallbackError) -> CallbackError {
        warn!(
            "[{}] {} → Failed({}): {}",
            self.request_id,
            self.state,
            error.reason_code(),
            error
        );
        self.state = CallbackState::Failed;
        error
    }
}

/// Exchange Client → Identity Store → Notifier 순서로 콜백을 처리하는 서비스
///
/// 모든 협력 객체는 생성자로 주입되며 요청 간에 레코드를 캐시하지 않습니다.
///
/// ```rust,ignore
/// let service = CallbackService::new(
///     Arc::new(DiscordOAuthClient::new(oauth_config)?),
///     Arc::new(MongoIdentityRepository::new(&database, "users")),
///     Arc::new(DiscordWebhookNotifier::new(webhook_config)?),
/// );
/// let record = service.handle(query).await?;
/// ```
pub struct CallbackService {
    exchange: Arc<dyn OAuthExchange>,
    store: Arc<dyn IdentityStore>,
    notifier: Arc<dyn Notifier>,
}

impl CallbackService {
    pub fn new(
        exchange: Arc<dyn OAuthExchange>,
        store: Arc<dyn IdentityStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { exchange, store, notifier }
    }

    pub fn store_backend(&self) -> &'static str {
        self.store.backend_name()
    }

    /// 콜백 요청 하나를 끝까지 처리합니다.
    ///
    /// # Returns
    ///
    /// * `Ok(IdentityRecord)` - `Succeeded`. 저장소가 반환한 레코드 (알림 실패 여부와 무관)
    /// * `Err(CallbackError)` - `Failed(reason)`. 실패 이전에 저장된 것은 없음
    pub async fn handle(&self, query: OAuthCallbackQuery) -> Result<IdentityRecord, CallbackError> {
        let mut run = CallbackRun::start();

        // Received
        if let Some(provider_error) = &query.error {
            warn!(
                "[{}] 프로바이더 에러 리디렉션: {} - {}",
                run.request_id,
                provider_error,
                query.error_description.as_deref().unwrap_or("-")
            );
        }
        if let Err(e) = query.validate() {
            return Err(run.fail(CallbackError::InvalidRequest(e.to_string())));
        }
        let OAuthCallbackQuery { code, guild_id, .. } = query;
        let Some(code) = code else {
            return Err(run.fail(CallbackError::MissingCode));
        };

        // Exchanging
        run.advance(CallbackState::Exchanging);
        let (token, profile) = match self.exchange.exchange(&code, guild_id.as_deref()).await {
            Ok(result) => result,
            Err(e) => return Err(run.fail(CallbackError::Exchange(e))),
        };

        // Persisting
        run.advance(CallbackState::Persisting);
        let record = IdentityRecord::from_exchange(token, &profile, guild_id, DateTime::now());
        let stored = match self.store.upsert(record).await {
            Ok(stored) => stored,
            Err(e) => return Err(run.fail(CallbackError::Store(e))),
        };
        info!("[{}] 인증 저장 완료: {} ({})", run.request_id, profile.username, profile.id);

        // Notifying
        run.advance(CallbackState::Notifying);
        if let Err(e) = self.notifier.notify(&profile).await {
            warn!("[{}] 알림 전송 실패 (무시): {}", run.request_id, e);
        }

        run.advance(CallbackState::Succeeded);
        Ok(stored)
    }
}
