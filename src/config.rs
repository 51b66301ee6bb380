/*
 * Responsibility
 * - 環境変数の読み込み (PORT, APP_ENV, OAUTH_BASE_URL, OAUTH_TIMEOUT_MS)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub const DEFAULT_OAUTH_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_OAUTH_TIMEOUT_MS: u64 = 200;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // identity service
    pub oauth_base_url: Url,
    pub oauth_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let oauth_base_url = parse_base_url(
            &std::env::var("OAUTH_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OAUTH_BASE_URL.to_string()),
        )?;

        let oauth_timeout_ms = std::env::var("OAUTH_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_OAUTH_TIMEOUT_MS);

        Ok(Self {
            addr,
            app_env,
            oauth_base_url,
            oauth_timeout: Duration::from_millis(oauth_timeout_ms),
        })
    }
}

// The token is appended as path segments, so the url must be able to carry a path.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|_| ConfigError::Invalid("OAUTH_BASE_URL"))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::Invalid("OAUTH_BASE_URL"));
    }

    Ok(url)
}
