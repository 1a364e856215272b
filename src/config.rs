/*
 * Responsibility
 * - 環境変数の読み込み (PORT, CORS, AUTH_* など)
 * - 設定値のバリデーション (不正なら起動失敗)
 * - 取得元は lookup 関数に閉じ込める (テストでは HashMap を渡す)
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::middleware::auth::DEFAULT_CONTEXT_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// JWT verification settings. Present only when a public key is configured.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub public_key_pem: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub leeway_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub request_timeout_seconds: u64,
    pub body_limit_bytes: usize,

    pub auth_context_key: String,
    pub auth_skip_paths: Vec<String>,
    pub auth_tokens_file: Option<PathBuf>,
    pub auth_jwt: Option<JwtConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(s) => s.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let cors_allowed_origins = split_list(lookup("CORS_ALLOWED_ORIGINS"));

        let request_timeout_seconds = lookup("REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let body_limit_bytes = lookup("BODY_LIMIT_BYTES")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        let auth_context_key = lookup("AUTH_CONTEXT_KEY")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTEXT_KEY.to_string());

        let auth_skip_paths = match lookup("AUTH_SKIP_PATHS") {
            Some(v) => split_list(Some(v)),
            None => vec!["/health".to_string()],
        };

        let auth_tokens_file = lookup("AUTH_TOKENS_FILE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let auth_jwt = match lookup("AUTH_JWT_PUBLIC_KEY_PEM").filter(|s| !s.trim().is_empty()) {
            Some(pem) => Some(JwtConfig {
                public_key_pem: pem.replace("\\n", "\n"),
                issuer: lookup("AUTH_JWT_ISSUER").filter(|s| !s.is_empty()),
                audience: lookup("AUTH_JWT_AUDIENCE").filter(|s| !s.is_empty()),
                leeway_seconds: lookup("AUTH_JWT_LEEWAY_SECONDS")
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60),
            }),
            None => {
                let set = |key: &str| lookup(key).is_some_and(|s| !s.is_empty());
                if set("AUTH_JWT_ISSUER") || set("AUTH_JWT_AUDIENCE") {
                    return Err(ConfigError::Missing("AUTH_JWT_PUBLIC_KEY_PEM"));
                }
                None
            }
        };

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            request_timeout_seconds,
            body_limit_bytes,
            auth_context_key,
            auth_skip_paths,
            auth_tokens_file,
            auth_jwt,
        })
    }
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
}
