//! 라우트 설정 모듈
//!
//! 모든 엔드포인트는 루트 경로에 등록됩니다. Discord 개발자 포털에 등록된
//! `redirect_uri`가 `/callback`을 가리키므로 스코프를 두지 않습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new()
//!     .app_data(callback_service.clone())
//!     .app_data(oauth_config.clone())
//!     .configure(configure_all_routes);
//! ```

use crate::handlers;
use crate::services::auth::callback_service::CallbackService;
use actix_web::{HttpResponse, get, web};
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// # Available Routes
///
/// - `GET /` - 라이브니스
/// - `GET /health` - 헬스체크 (JSON)
/// - `GET /login` - Discord 인증 페이지로 리디렉션
/// - `GET /callback` - Discord OAuth 콜백
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(handlers::callback::callback_query_config());

    cfg.service(health_check);

    cfg.service(handlers::callback::ready)
        .service(handlers::callback::discord_login)
        .service(handlers::callback::discord_callback);
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:10000/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "discord_auth_service",
///   "version": "0.1.0",
///   "timestamp": "2026-10-16T00:00:00+00:00",
///   "features": {
///     "identity_store": "MongoDB",
///     "oauth_provider": "Discord"
///   }
/// }
/// ```
#[get("/health")]
async fn health_check(service: web::Data<CallbackService>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "identity_store": service.store_backend(),
            "oauth_provider": "Discord"
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use actix_web::{App, test};
    use async_trait::async_trait;
    use serde_json::Value;

    use crate::config::WebhookConfig;
    use crate::domain::dto::tokens::response::DiscordTokenResponse;
    use crate::domain::models::oauth::discord_user::DiscordUser;
    use crate::errors::errors::ExchangeError;
    use crate::repositories::identities::InMemoryIdentityStore;
    use crate::services::auth::discord_oauth_client::OAuthExchange;
    use crate::services::notify::webhook_notifier::DiscordWebhookNotifier;

    struct RejectingExchange;

    #[async_trait]
    impl OAuthExchange for RejectingExchange {
        async fn exchange(
            &self,
            _code: &str,
            _guild_id: Option<&str>,
        ) -> Result<(DiscordTokenResponse, DiscordUser), ExchangeError> {
            Err(ExchangeError::Network("offline".to_string()))
        }
    }

    fn service() -> web::Data<CallbackService> {
        let notifier = DiscordWebhookNotifier::new(WebhookConfig {
            url: None,
            http_timeout: Duration::from_secs(1),
        })
        .unwrap();
        web::Data::new(CallbackService::new(
            Arc::new(RejectingExchange),
            Arc::new(InMemoryIdentityStore::new()),
            Arc::new(notifier),
        ))
    }

    #[actix_web::test]
    async fn test_health_check_reports_store_backend() {
        let app = test::init_service(
            App::new().app_data(service()).configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "discord_auth_service");
        assert_eq!(body["features"]["identity_store"], "In-Memory");
    }

    #[actix_web::test]
    async fn test_all_routes_registered() {
        let app = test::init_service(
            App::new().app_data(service()).configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::get().uri("/callback?code=abc").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            actix_web::http::StatusCode::BAD_GATEWAY
        );
    }

    #[actix_web::test]
    async fn test_query_errors_use_html_failure_page() {
        let app = test::init_service(
            App::new().app_data(service()).configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/callback?code=a&code=b").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get(actix_web::http::header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }
}
