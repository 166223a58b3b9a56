//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `main`에서 한 번 생성되어 `web::Data`로 핸들러에 주입됩니다.
//! 외부 시스템과 맞닿는 지점은 트레이트(`OAuthExchange`, `Notifier`)로 분리되어 있어
//! 테스트에서 가짜 구현으로 교체할 수 있습니다.
//!
//! - `auth`: Discord 코드 교환과 콜백 트랜잭션
//! - `notify`: 인증 완료 웹훅 알림

pub mod auth;
pub mod notify;
