//! 데이터 및 서버 설정 관리 모듈
//!
//! HTTP 서버 바인딩, MongoDB 연결, Identity Store 백엔드 선택 설정을 관리합니다.

use std::env;
use std::fmt;

use crate::errors::errors::{AppError, AppResult};
use super::{optional, parsed};

/// HTTP 서버 설정
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// ## 환경 변수
    /// - `HOST` (기본값: "0.0.0.0")
    /// - `PORT` (기본값: 10000)
    /// - `WORKERS` (기본값: 4)
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let workers = parsed(&lookup, "WORKERS", 4usize)?;
        if workers == 0 {
            return Err(AppError::ConfigError("WORKERS must be at least 1".to_string()));
        }

        Ok(Self {
            host: optional(&lookup, "HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&lookup, "PORT", 10000u16)?,
            workers,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Identity Store 백엔드 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// MongoDB 컬렉션 (운영 환경)
    MongoDb,
    /// 프로세스 메모리 (로컬 실행/테스트, 재시작 시 소실)
    Memory,
}

impl StoreBackend {
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(AppError::ConfigError(format!(
                "STORE_BACKEND must be 'mongodb' or 'memory', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::MongoDb => write!(f, "MongoDB"),
            StoreBackend::Memory => write!(f, "In-Memory"),
        }
    }
}

/// MongoDB 및 저장소 설정
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub uri: String,
    pub database_name: String,
    pub collection_name: String,
}

impl DatabaseConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// ## 환경 변수
    /// - `STORE_BACKEND` (기본값: "mongodb")
    /// - `MONGO_URI` 또는 `MONGODB_URI` (기본값: "mongodb://localhost:27017")
    /// - `DATABASE_NAME` (기본값: "auth_database")
    /// - `USERS_COLLECTION` (기본값: "users")
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match optional(&lookup, "STORE_BACKEND") {
            Some(raw) => StoreBackend::parse(&raw)?,
            None => StoreBackend::MongoDb,
        };

        let uri = optional(&lookup, "MONGO_URI")
            .or_else(|| optional(&lookup, "MONGODB_URI"))
            .unwrap_or_else(|| "mongodb://localhost:27017".to_string());

        Ok(Self {
            backend,
            uri,
            database_name: optional(&lookup, "DATABASE_NAME")
                .unwrap_or_else(|| "auth_database".to_string()),
            collection_name: optional(&lookup, "USERS_COLLECTION")
                .unwrap_or_else(|| "users".to_string()),
        })
    }
}
