use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Upstream used when BASE_API_URL is not set. Points at the QA backend.
pub const DEFAULT_BASE_API_URL: &str = "https://dev.resq-qa.com";

/// Insecure fallback session secret; only acceptable in development.
pub const DEFAULT_SESSION_SECRET: &str = "resq-admin-secret";

/// Longest accepted session lifetime, one year.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid upstream base URL '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Upstream base URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_hours: i64,
    pub secure_cookies: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("BIND_HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("RESQ_ADMIN_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }
        if let Ok(v) = env::var("STATIC_DIR") {
            self.server.static_dir = PathBuf::from(v);
        }

        // Upstream overrides
        if let Ok(v) = env::var("BASE_API_URL") {
            if !v.trim().is_empty() {
                self.upstream.base_url = v.trim().to_string();
            }
        }
        if let Ok(v) = env::var("UPSTREAM_TIMEOUT_SECS") {
            self.upstream.timeout_secs = v.parse().unwrap_or(self.upstream.timeout_secs);
        }

        // Session overrides
        if let Ok(v) = env::var("SESSION_SECRET") {
            if !v.is_empty() {
                self.session.secret = v;
            }
        }
        if let Ok(v) = env::var("SESSION_TTL_HOURS") {
            self.session.ttl_hours = v
                .parse::<i64>()
                .map(|h| h.clamp(1, MAX_SESSION_TTL_HOURS))
                .unwrap_or(self.session.ttl_hours);
        }
        if let Ok(v) = env::var("SESSION_SECURE_COOKIES") {
            self.session.secure_cookies = v.parse().unwrap_or(self.session.secure_cookies);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                static_dir: PathBuf::from("public"),
            },
            upstream: UpstreamConfig {
                base_url: DEFAULT_BASE_API_URL.to_string(),
                timeout_secs: 15,
            },
            session: SessionConfig {
                secret: DEFAULT_SESSION_SECRET.to_string(),
                ttl_hours: 4,
                secure_cookies: false,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                static_dir: PathBuf::from("public"),
            },
            upstream: UpstreamConfig {
                base_url: DEFAULT_BASE_API_URL.to_string(),
                timeout_secs: 15,
            },
            session: SessionConfig {
                secret: DEFAULT_SESSION_SECRET.to_string(),
                ttl_hours: 4,
                secure_cookies: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                static_dir: PathBuf::from("public"),
            },
            upstream: UpstreamConfig {
                base_url: DEFAULT_BASE_API_URL.to_string(),
                timeout_secs: 10,
            },
            session: SessionConfig {
                secret: DEFAULT_SESSION_SECRET.to_string(),
                ttl_hours: 4,
                secure_cookies: true,
            },
        }
    }

    /// Parsed upstream base URL. Rejects anything that is not http(s).
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.upstream.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            value: self.upstream.base_url.clone(),
            source,
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.timeout_secs.max(1))
    }

    /// Session lifetime, held between one hour and one year.
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session.ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS))
    }

    pub fn uses_default_secret(&self) -> bool {
        self.session.secret == DEFAULT_SESSION_SECRET
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[macro_export]
macro_rules! is_development {
    ($config:expr) => {
        matches!($config.environment, $crate::config::Environment::Development)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.upstream.base_url, DEFAULT_BASE_API_URL);
        assert_eq!(config.session.ttl_hours, 4);
        assert!(!config.session.secure_cookies);
        assert!(config.uses_default_secret());
        assert!(is_development!(config));
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.session.secure_cookies);
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
        assert!(!is_development!(config));
    }

    #[test]
    fn session_ttl_is_four_hours_by_default() {
        assert_eq!(AppConfig::development().session_ttl(), chrono::Duration::hours(4));
    }

    #[test]
    fn session_ttl_is_clamped() {
        let mut config = AppConfig::development();
        config.session.ttl_hours = i64::MAX;
        assert_eq!(config.session_ttl(), chrono::Duration::hours(MAX_SESSION_TTL_HOURS));

        config.session.ttl_hours = -3;
        assert_eq!(config.session_ttl(), chrono::Duration::hours(1));
    }

    #[test]
    fn upstream_timeout_defaults_to_fifteen_seconds() {
        assert_eq!(AppConfig::development().upstream_timeout(), Duration::from_secs(15));
        assert_eq!(AppConfig::staging().upstream_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn base_url_rejects_non_http_schemes() {
        let mut config = AppConfig::development();
        config.upstream.base_url = "ftp://example.com".to_string();
        assert!(matches!(config.base_url(), Err(ConfigError::UnsupportedScheme(_))));

        config.upstream.base_url = "not a url".to_string();
        assert!(matches!(config.base_url(), Err(ConfigError::InvalidBaseUrl { .. })));

        config.upstream.base_url = "http://127.0.0.1:9000".to_string();
        assert!(config.base_url().is_ok());
    }
}
