//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 기본값 → `config/default.toml`(선택) → `BUDGET__*` 환경 변수 순서로 덮어씁니다.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 개발용 기본 JWT 시크릿. 운영에서는 반드시 교체해야 합니다.
pub const DEFAULT_JWT_SECRET: &str = "dev-secret-key-change-in-production";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 데이터베이스 설정
    #[serde(default)]
    pub database: DatabaseConfig,
    /// 인증 설정
    #[serde(default)]
    pub auth: AuthConfig,
    /// 프론트엔드 번들 설정
    #[serde(default)]
    pub frontend: FrontendConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 허용할 CORS origin 목록 (비어 있으면 모든 origin 허용)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite 연결 URL
    pub url: String,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 획득 타임아웃 (초)
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://database.db?mode=rwc".to_string(),
            max_connections: 5,
            acquire_timeout_secs: 10,
        }
    }
}

/// 인증 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HS256 서명 키
    pub jwt_secret: String,
    /// Access Token 만료 시간 (분)
    pub token_expire_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_expire_minutes: 30_000,
        }
    }
}

impl AuthConfig {
    /// 개발용 기본 시크릿을 그대로 사용 중인지 확인합니다.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

/// 프론트엔드 정적 번들 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FrontendConfig {
    /// 빌드된 번들 디렉터리 (index.html 포함)
    pub dist_dir: PathBuf,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            dist_dir: PathBuf::from("client/dist"),
        }
    }
}

impl FrontendConfig {
    /// SPA 폴백 문서 경로.
    pub fn index_file(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "budget_api=info,tower_http=info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없어도 에러가 아니며, 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let defaults = AppConfig::default();

        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("database.url", defaults.database.url)?
            .set_default(
                "database.max_connections",
                i64::from(defaults.database.max_connections),
            )?
            .set_default(
                "database.acquire_timeout_secs",
                defaults.database.acquire_timeout_secs as i64,
            )?
            .set_default("auth.jwt_secret", defaults.auth.jwt_secret)?
            .set_default(
                "auth.token_expire_minutes",
                defaults.auth.token_expire_minutes,
            )?
            .set_default(
                "frontend.dist_dir",
                defaults.frontend.dist_dir.to_string_lossy().to_string(),
            )?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("BUDGET")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}
