use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

use yield_data::{LatencyProfile, DEMO_USER_ID};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Multiplier on the simulated provider latency (0 disables it)
    pub latency_scale: f64,
    /// Caller identity when a request carries no `user_id`
    pub default_user_id: String,
    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            latency_scale: 1.0,
            default_user_id: DEMO_USER_ID.to_string(),
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: match env::var("PORT") {
                Ok(v) => v.parse().with_context(|| format!("Invalid PORT '{}'", v))?,
                Err(_) => defaults.port,
            },
            latency_scale: match env::var("YIELD_LATENCY_SCALE") {
                Ok(v) => v
                    .parse()
                    .with_context(|| format!("Invalid YIELD_LATENCY_SCALE '{}'", v))?,
                Err(_) => defaults.latency_scale,
            },
            default_user_id: env::var("DEFAULT_USER_ID").unwrap_or(defaults.default_user_id),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or(defaults.cors_origins),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.latency_scale < 0.0 || !self.latency_scale.is_finite() {
            anyhow::bail!("YIELD_LATENCY_SCALE must be a non-negative number, got {}", self.latency_scale);
        }
        if self.default_user_id.trim().is_empty() {
            anyhow::bail!("DEFAULT_USER_ID must not be empty");
        }
        Ok(())
    }

    pub fn latency(&self) -> LatencyProfile {
        LatencyProfile::scaled(self.latency_scale)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://localhost:3001, https://app.example.com ,"),
            vec!["http://localhost:3001", "https://app.example.com"]
        );
        assert_eq!(parse_origins(" , "), vec!["*"]);
    }

    #[test]
    fn test_validate_rejects_negative_latency() {
        let config = ServerConfig {
            latency_scale: -1.0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..ServerConfig::default()
        };
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
        assert!(config.allows_any_origin());
    }
}
