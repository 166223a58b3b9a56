//! # OAuth 콜백 HTTP 핸들러
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/` | 라이브니스 확인 | 200 OK |
//! | `GET` | `/login` | Discord 인증 페이지로 이동 | 302 Found |
//! | `GET` | `/callback` | Discord 리디렉션 처리 | 200 / 400 / 502 / 503 |
//!
//! 콜백 응답은 항상 HTML 페이지이며 실패 여부는 상태 코드로 구분됩니다.

use actix_web::{HttpResponse, error::InternalError, get, http::header, web};
use log::warn;
use validator::Validate;

use crate::config::DiscordOAuthConfig;
use crate::domain::dto::callback::request::{LoginQuery, OAuthCallbackQuery};
use crate::errors::errors::{AppError, CallbackError};
use crate::services::auth::callback_service::CallbackService;
use super::pages::{failure_page, success_page};

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// 쿼리 문자열 역직렬화 실패도 HTML 실패 페이지로 응답하도록 하는 추출기 설정
///
/// 중복 파라미터(`?code=a&code=b`) 등은 핸들러에 도달하기 전에 거부되므로
/// 여기서 `InvalidRequest` 페이지를 만듭니다.
pub fn callback_query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        warn!("쿼리 파싱 실패 - path: {}, 에러: {}", req.path(), err);

        let failure = CallbackError::InvalidRequest(err.to_string());
        let response = HttpResponse::build(failure.status_code())
            .content_type(HTML_CONTENT_TYPE)
            .body(failure_page(&failure));

        InternalError::from_response(err, response).into()
    })
}

/// 라이브니스 확인
///
/// # Endpoint
/// `GET /`
#[get("/")]
pub async fn ready() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Ready for authorization")
}

/// Discord 인증 페이지로 리디렉션합니다.
///
/// # Endpoint
/// `GET /login?guild_id={guild_id}`
#[get("/login")]
pub async fn discord_login(
    query: web::Query<LoginQuery>,
    oauth_config: web::Data<DiscordOAuthConfig>,
) -> Result<HttpResponse, AppError> {
    query.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let url = oauth_config.authorize_url(query.guild_id.as_deref());

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, url))
        .finish())
}

/// Discord OAuth 콜백 처리
///
/// # Endpoint
/// `GET /callback?code={code}&guild_id={guild_id}`
#[get("/callback")]
pub async fn discord_callback(
    query: web::Query<OAuthCallbackQuery>,
    service: web::Data<CallbackService>,
) -> HttpResponse {
    match service.handle(query.into_inner()).await {
        Ok(_) => HttpResponse::Ok()
            .content_type(HTML_CONTENT_TYPE)
            .body(success_page()),
        Err(e) => HttpResponse::build(e.status_code())
            .content_type(HTML_CONTENT_TYPE)
            .body(failure_page(&e)),
    }
}
