//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 콜백 트랜잭션의 각 단계(요청 검증, 토큰 교환, 저장, 알림)별로
//! 분리된 에러 타입과, 서비스 기동/설정 단계에서 사용하는 `AppError`를 정의합니다.
//!
//! ## 에러 분류
//!
//! | 타입 | 발생 단계 | 처리 방식 |
//! |------|-----------|-----------|
//! | `CallbackError::MissingCode` | Received | 400 실패 페이지 |
//! | `CallbackError::InvalidRequest` | Received | 400 실패 페이지 |
//! | `ExchangeError` | Exchanging | 502 실패 페이지 |
//! | `StoreError` | Persisting | 503 실패 페이지 |
//! | `NotifyError` | Notifying | 로그만 남기고 무시 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::errors::{CallbackError, ExchangeError};
//!
//! let (token, profile) = exchange_client
//!     .exchange(&code, guild_id.as_deref())
//!     .await
//!     .map_err(CallbackError::Exchange)?;
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 설정 로드, 데이터베이스 연결 등 요청 처리 바깥에서 발생하는 에러입니다.
/// HTTP 응답으로 변환될 경우 JSON 본문을 사용합니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 설정값 누락/파싱 실패 (500 Internal Server Error)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// OAuth 토큰 교환 / 프로필 조회 단계의 에러
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// 토큰 엔드포인트가 non-2xx 응답을 주었거나 `access_token`이 없는 경우
    #[error("token exchange rejected: {0}")]
    TokenRejected(String),

    /// 사용자 정보 엔드포인트가 non-2xx 응답을 주었거나 본문 파싱에 실패한 경우
    #[error("profile fetch failed: {0}")]
    ProfileFetchFailed(String),

    /// 연결 실패, 타임아웃 등 전송 계층 에러
    #[error("network error: {0}")]
    Network(String),
}

/// Identity Store 에러
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("identity store unavailable: {0}")]
    Unavailable(String),

    #[error("identity store constraint violation: {0}")]
    ConstraintViolation(String),
}

/// 알림 전송 에러. 트랜잭션 결과에 영향을 주지 않으며 로그로만 남습니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("webhook rejected with status {0}")]
    Rejected(u16),

    #[error("webhook network error: {0}")]
    Network(String),
}

/// 콜백 트랜잭션의 실패 사유 (`Failed(reason)` 상태)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallbackError {
    #[error("authorization code is missing")]
    MissingCode,

    #[error("invalid callback request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CallbackError {
    /// 실패 페이지와 함께 내려줄 HTTP 상태 코드
    pub fn status_code(&self) -> StatusCode {
        match self {
            CallbackError::MissingCode | CallbackError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            CallbackError::Exchange(_) => StatusCode::BAD_GATEWAY,
            CallbackError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// 로그/메트릭용 짧은 사유 코드
    pub fn reason_code(&self) -> &'static str {
        match self {
            CallbackError::MissingCode => "missing_code",
            CallbackError::InvalidRequest(_) => "invalid_request",
            CallbackError::Exchange(ExchangeError::TokenRejected(_)) => "token_rejected",
            CallbackError::Exchange(ExchangeError::ProfileFetchFailed(_)) => "profile_fetch_failed",
            CallbackError::Exchange(ExchangeError::Network(_)) => "exchange_network",
            CallbackError::Store(StoreError::Unavailable(_)) => "store_unavailable",
            CallbackError::Store(StoreError::ConstraintViolation(_)) => "store_constraint",
        }
    }
}
