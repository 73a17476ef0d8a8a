//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Signing key shipped as a default so the demo runs out of the box.
///
/// WARNING: This is a placeholder! Change this in production.
pub const PLACEHOLDER_SECRET_KEY: &str = "your_secret_key";

/// Root configuration for the item board.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Session cookie settings.
    pub session: SessionConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request limits.
    pub security: SecurityConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Session cookie configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Key used to sign session cookies.
    pub secret_key: String,

    /// Name of the session cookie.
    pub cookie_name: String,

    /// Cookie lifetime in seconds. 0 issues a browser-session cookie.
    pub max_age_secs: u64,

    /// Mark the cookie `Secure` (only sent over HTTPS).
    pub secure: bool,
}

impl SessionConfig {
    /// Whether the signing key is still the shipped placeholder.
    pub fn uses_placeholder_secret(&self) -> bool {
        self.secret_key == PLACEHOLDER_SECRET_KEY
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret_key: PLACEHOLDER_SECRET_KEY.to_string(),
            cookie_name: "session".to_string(),
            max_age_secs: 0,
            secure: false,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 16 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Development mode: pretty logs at debug level.
    pub debug: bool,

    /// Log level (trace, debug, info, warn, error) used outside debug mode.
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [session]
            secret_key = "s3cr3t"
            "#,
        )
        .unwrap();

        assert_eq!(config.session.secret_key, "s3cr3t");
        assert_eq!(config.session.cookie_name, "session");
        assert_eq!(config.listener.bind_address, "0.0.0.0:5000");
        assert!(!config.session.uses_placeholder_secret());
    }

    #[test]
    fn test_default_secret_is_placeholder() {
        assert!(AppConfig::default().session.uses_placeholder_secret());
    }
}
