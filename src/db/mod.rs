//! Database Connection Management Module
//!
//! MongoDB 연결 관리를 담당하는 모듈입니다.
//! 프로세스 전역 클라이언트를 두지 않고, `main`에서 한 번 생성한 `Database`를
//! 리포지토리에 주입한 뒤 종료 시점에 `shutdown`으로 정리합니다.
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::config::DatabaseConfig;
//! use crate::db::Database;
//!
//! let config = DatabaseConfig::from_env()?;
//! let database = Database::connect(&config).await?;
//! let repo = MongoIdentityRepository::new(&database, &config.collection_name);
//! // ... 서버 실행 ...
//! database.shutdown().await;
//! ```

use log::info;
use mongodb::{Client, options::ClientOptions};

use crate::config::DatabaseConfig;
use crate::errors::errors::{AppError, AppResult};

/// MongoDB 데이터베이스 연결 래퍼
#[derive(Clone)]
pub struct Database {
    /// MongoDB 클라이언트 인스턴스 (내부적으로 커넥션 풀 공유)
    client: Client,
    /// 사용할 데이터베이스 이름
    database_name: String,
}

impl Database {
    /// 새 MongoDB 연결을 생성하고 `ping`으로 연결 상태를 검증합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::DatabaseError` - URI 파싱 실패, 연결 실패
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| AppError::DatabaseError(format!("MongoDB URI 파싱 실패: {}", e)))?;

        // 애플리케이션 이름 설정 (모니터링 및 로깅에 유용)
        client_options.app_name = Some("discord_auth".to_string());

        let client = Client::with_options(client_options)
            .map_err(|e| AppError::DatabaseError(format!("MongoDB 클라이언트 생성 실패: {}", e)))?;

        client
            .database(&config.database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(format!("MongoDB 연결 확인 실패: {}", e)))?;

        info!("✅ MongoDB 연결 성공: {}", config.database_name);

        Ok(Self {
            client,
            database_name: config.database_name.clone(),
        })
    }

    /// MongoDB 데이터베이스 인스턴스를 반환합니다.
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    /// 데이터베이스 이름을 반환합니다.
    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// 진행 중인 작업이 끝나길 기다린 뒤 커넥션 풀을 닫습니다.
    pub async fn shutdown(self) {
        info!("MongoDB 연결 종료 중: {}", self.database_name);
        self.client.shutdown().await;
    }
}
