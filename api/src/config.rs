//! Application configuration loaded from environment variables.

use chrono::Duration;
use std::{env, time};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set")]
    MissingSecret,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub request_timeout_secs: u64,
    pub max_concurrent_requests: usize,
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Only `JWT_SECRET` is mandatory; unparseable numbers fall back to
    /// their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parsed_or("PORT", 3000),
            jwt_secret,
            token_ttl_hours: parsed_or("TOKEN_TTL_HOURS", 24),
            request_timeout_secs: parsed_or("REQUEST_TIMEOUT_SECS", 30),
            max_concurrent_requests: parsed_or("MAX_CONCURRENT_REQUESTS", 1024),
        })
    }

    /// Defaults with the given secret. Used by tests and embedders.
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            jwt_secret: jwt_secret.into(),
            token_ttl_hours: 24,
            request_timeout_secs: 30,
            max_concurrent_requests: 1024,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::hours(self.token_ttl_hours)
    }

    pub fn request_timeout(&self) -> time::Duration {
        time::Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_secret_defaults() {
        let config = AppConfig::with_secret("s3cret");

        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.token_ttl(), Duration::hours(24));
        assert_eq!(config.request_timeout(), time::Duration::from_secs(30));
    }
}
