//! Discord 인증 콜백 서비스 메인 애플리케이션
//!
//! 설정을 한 번 읽어 저장소, Discord 클라이언트, 웹훅 알림기를 만들고
//! `web::Data`로 주입한 Actix-web 서버를 구동합니다.

use std::io;
use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use discord_auth_service::config::{
    DatabaseConfig, DiscordOAuthConfig, ServerConfig, StoreBackend, WebhookConfig,
};
use discord_auth_service::db::Database;
use discord_auth_service::errors::errors::{AppError, AppResult};
use discord_auth_service::repositories::identities::{
    IdentityStore, InMemoryIdentityStore, MongoIdentityRepository,
};
use discord_auth_service::routes::configure_all_routes;
use discord_auth_service::services::auth::{CallbackService, DiscordOAuthClient};
use discord_auth_service::services::notify::DiscordWebhookNotifier;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 Discord 인증 서비스 시작중...");

    let server_config = ServerConfig::from_env().map_err(startup_error)?;
    let database_config = DatabaseConfig::from_env().map_err(startup_error)?;
    let oauth_config = DiscordOAuthConfig::from_env().map_err(startup_error)?;
    let webhook_config = WebhookConfig::from_env().map_err(startup_error)?;

    if !webhook_config.is_enabled() {
        warn!("WEBHOOK_URL 미설정 - 인증 알림이 비활성화됩니다");
    }

    // 데이터 스토어 초기화
    let (store, database) = initialize_identity_store(&database_config)
        .await
        .map_err(startup_error)?;

    let exchange = DiscordOAuthClient::new(oauth_config.clone()).map_err(startup_error)?;
    let notifier = DiscordWebhookNotifier::new(webhook_config).map_err(startup_error)?;

    let callback_service = web::Data::new(CallbackService::new(
        Arc::new(exchange),
        store,
        Arc::new(notifier),
    ));
    let oauth_config = web::Data::new(oauth_config);

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    let result = start_http_server(&server_config, callback_service, oauth_config).await;

    if let Some(database) = database {
        database.shutdown().await;
    }

    result
}

/// HTTP 서버를 구성하고 실행합니다
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(
    server_config: &ServerConfig,
    callback_service: web::Data<CallbackService>,
    oauth_config: web::Data<DiscordOAuthConfig>,
) -> io::Result<()> {
    let bind_address = server_config.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 OAuth callback: http://{}/callback", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(callback_service.clone())
            .app_data(oauth_config.clone())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(server_config.workers)
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// 로거 초기화 전에 호출되므로 결과는 표준 에러로 출력합니다.
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let filename = match profile.as_str() {
        "prod" => ".env.prod",
        "dev" => ".env.dev",
        _ => {
            dotenv().ok();
            return;
        }
    };

    if let Err(e) = dotenv::from_filename(filename) {
        eprintln!("{} 파일 로드 실패 (환경 변수만 사용): {}", filename, e);
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=discord_auth_service=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// 설정된 백엔드의 Identity 저장소를 만듭니다
///
/// MongoDB 백엔드는 종료 시 정리할 `Database`를 함께 반환합니다.
async fn initialize_identity_store(
    config: &DatabaseConfig,
) -> AppResult<(Arc<dyn IdentityStore>, Option<Database>)> {
    info!("📡 Identity 저장소 초기화 중... ({})", config.backend);

    match config.backend {
        StoreBackend::MongoDb => {
            let database = Database::connect(config).await?;
            let repository = MongoIdentityRepository::new(&database, &config.collection_name);
            repository.create_indexes().await?;

            info!("✅ 컬렉션 준비 완료: {}.{}", database.database_name(), config.collection_name);
            Ok((Arc::new(repository), Some(database)))
        }
        StoreBackend::Memory => {
            warn!("메모리 저장소 사용 중 - 재시작 시 모든 인증 기록이 사라집니다");
            Ok((Arc::new(InMemoryIdentityStore::new()), None))
        }
    }
}

fn startup_error(e: AppError) -> io::Error {
    error!("서비스 초기화 실패: {}", e);
    io::Error::other(e.to_string())
}
