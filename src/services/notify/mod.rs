//! 인증 완료 알림 서비스
//!
//! 알림은 best-effort 입니다. 실패해도 콜백 트랜잭션 결과에 영향을 주지 않으며
//! 호출자는 에러를 로그로만 남깁니다.

pub mod webhook_notifier;

pub use webhook_notifier::*;
