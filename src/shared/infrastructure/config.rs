use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::shared::errors::{AppError, AppResult};

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REGION: &str = "ap-northeast-1";
const DEFAULT_BUCKET: &str = "my-app-bucket";
const DEFAULT_DEBUG_USER: &str = "debug-user";

/// Process configuration, read once at startup and handed out by reference.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    pub region: String,
    pub bucket: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub endpoint: Option<String>,
    pub force_path_style: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// When set, requests without an identity header run as this user.
    pub debug_user: Option<String>,
}

impl AppConfig {
    /// Build the configuration from the process environment, loading `.env` first if present.
    pub fn from_env() -> AppResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(AppError::ConfigError(format!("Failed to read .env: {}", e)));
            }
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server = ServerConfig {
            addr: parse_addr(get("APP_ADDR").as_deref().unwrap_or(DEFAULT_ADDR))?,
            request_timeout: Duration::from_secs(match get("REQUEST_TIMEOUT_SECS") {
                Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                    AppError::ConfigError(format!("REQUEST_TIMEOUT_SECS is not a number: {}", raw))
                })?,
                None => DEFAULT_REQUEST_TIMEOUT_SECS,
            }),
        };

        let url = get("DATABASE_URL").ok_or_else(|| {
            AppError::ConfigError("DATABASE_URL environment variable not found".to_string())
        })?;
        let database = DatabaseConfig {
            url: validate_database_url(url)?,
            max_connections: match get("DB_MAX_CONNECTIONS") {
                Some(raw) => Some(raw.trim().parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(
                    || AppError::ConfigError(format!("DB_MAX_CONNECTIONS must be positive: {}", raw)),
                )?),
                None => None,
            },
        };

        let storage = StorageConfig {
            region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            bucket: get("AWS_S3_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            access_key_id: get("AWS_ACCESS_KEY_ID"),
            secret_access_key: get("AWS_SECRET_ACCESS_KEY"),
            endpoint: get("AWS_ENDPOINT_URL"),
            force_path_style: get("AWS_S3_FORCE_PATH_STYLE")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        };

        let debug = get("DEBUG").map(|v| parse_flag(&v)).unwrap_or(false);
        let auth = AuthConfig {
            debug_user: debug
                .then(|| get("DEBUG_USER").unwrap_or_else(|| DEFAULT_DEBUG_USER.to_string())),
        };

        Ok(Self {
            server,
            database,
            storage,
            auth,
        })
    }
}

/// Accepts `host:port` as well as the bare `:port` form.
fn parse_addr(raw: &str) -> AppResult<SocketAddr> {
    let raw = raw.trim();
    let normalized = if raw.starts_with(':') {
        format!("0.0.0.0{}", raw)
    } else {
        raw.to_string()
    };

    normalized
        .parse::<SocketAddr>()
        .map_err(|e| AppError::ConfigError(format!("Invalid APP_ADDR '{}': {}", raw, e)))
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim(), "1" | "t" | "T" | "true" | "TRUE" | "True")
}

fn validate_database_url(url: String) -> AppResult<String> {
    if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
        return Err(AppError::ConfigError(
            "Invalid database URL format. Must start with postgres:// or postgresql://".to_string(),
        ));
    }
    Ok(url)
}
