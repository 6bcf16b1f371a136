//! Configuration management for the HubSpot MCP Server.
//!
//! This module handles loading and validating configuration from environment variables.
//! It avoids polluting stdout (which MCP uses for communication) by loading the
//! .env file through `dotenvy`, which never prints.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default HubSpot API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.hubapi.com";

/// Configuration for the HubSpot MCP Server.
#[derive(Debug, Clone)]
pub struct Config {
    /// HubSpot API base URL
    pub api_base_url: String,

    /// Private app access token. Absent tokens are reported per tool call,
    /// not at startup, so the server can still list its tools.
    pub access_token: Option<String>,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Engagements fetched in detail per kind (default: 5)
    pub activity_sample_size: usize,

    /// Deadline for a whole activity summary in seconds (default: 30)
    pub activity_timeout_secs: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Recognized environment variables:
    /// - `HUBSPOT_ACCESS_TOKEN`: bearer token (optional here, required by every tool)
    /// - `HUBSPOT_API_BASE_URL`: API base URL (default: https://api.hubapi.com)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `ACTIVITY_SAMPLE_SIZE`: engagements detailed per kind (default: 5)
    /// - `ACTIVITY_TIMEOUT_SECS`: deadline for one activity summary (default: 30)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let api_base_url =
            env::var("HUBSPOT_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "HUBSPOT_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        // A blank token is the same as no token
        let access_token = env::var("HUBSPOT_ACCESS_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let activity_sample_size = Self::parse_env_usize("ACTIVITY_SAMPLE_SIZE", 5)?;
        let activity_timeout_secs = Self::parse_env_u64("ACTIVITY_TIMEOUT_SECS", 30)?;

        for (var, value) in [
            ("REQUEST_TIMEOUT", request_timeout),
            ("ACTIVITY_TIMEOUT_SECS", activity_timeout_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    var: var.to_string(),
                    reason: "Must be a positive number, got: 0".to_string(),
                });
            }
        }

        if activity_sample_size == 0 || activity_sample_size > 100 {
            return Err(ConfigError::InvalidValue {
                var: "ACTIVITY_SAMPLE_SIZE".to_string(),
                reason: "Must be between 1 and 100".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            api_base_url,
            access_token,
            request_timeout,
            activity_sample_size,
            activity_timeout_secs,
            log_level,
        })
    }

    /// Whether a bearer token is available.
    pub fn has_credentials(&self) -> bool {
        self.access_token.is_some()
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            access_token: None,
            request_timeout: 10,
            activity_sample_size: 5,
            activity_timeout_secs: 30,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const VARS: &[&str] = &[
        "HUBSPOT_API_BASE_URL",
        "HUBSPOT_ACCESS_TOKEN",
        "REQUEST_TIMEOUT",
        "ACTIVITY_SAMPLE_SIZE",
        "ACTIVITY_TIMEOUT_SECS",
        "LOG_LEVEL",
    ];

    // Sets vars for one test and clears every recognized var on drop, so a
    // developer's .env cannot leak values between tests.
    struct EnvGuard;

    impl EnvGuard {
        fn new() -> Self {
            for var in VARS {
                env::remove_var(var);
            }
            EnvGuard
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://api.hubapi.com");
        assert!(config.access_token.is_none());
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.activity_sample_size, 5);
        assert_eq!(config.activity_timeout_secs, 30);
        assert!(!config.has_credentials());
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set("HUBSPOT_API_BASE_URL", "api.hubapi.com");
        guard.set("HUBSPOT_ACCESS_TOKEN", "pat-na1-test");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "HUBSPOT_API_BASE_URL");
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_blank_token_is_absent() {
        let mut guard = EnvGuard::new();
        guard.set("HUBSPOT_API_BASE_URL", "https://api.hubapi.com");
        guard.set("HUBSPOT_ACCESS_TOKEN", "   ");

        let config = Config::from_env().unwrap();
        assert!(config.access_token.is_none());
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("HUBSPOT_API_BASE_URL", "http://localhost:8080");
        guard.set("HUBSPOT_ACCESS_TOKEN", "pat-na1-test");
        guard.set("REQUEST_TIMEOUT", "3");
        guard.set("ACTIVITY_SAMPLE_SIZE", "8");

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.access_token.as_deref(), Some("pat-na1-test"));
        assert_eq!(config.request_timeout, 3);
        assert_eq!(config.activity_sample_size, 8);
        assert_eq!(config.activity_timeout_secs, 30);
    }

    #[test]
    #[serial]
    fn test_config_rejects_zero_sample_size() {
        let mut guard = EnvGuard::new();
        guard.set("HUBSPOT_API_BASE_URL", "https://api.hubapi.com");
        guard.set("ACTIVITY_SAMPLE_SIZE", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "ACTIVITY_SAMPLE_SIZE");
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_rejects_zero_timeouts() {
        for var in ["REQUEST_TIMEOUT", "ACTIVITY_TIMEOUT_SECS"] {
            let mut guard = EnvGuard::new();
            guard.set("HUBSPOT_API_BASE_URL", "https://api.hubapi.com");
            guard.set(var, "0");

            match Config::from_env() {
                Err(ConfigError::InvalidValue { var: rejected, reason }) => {
                    assert_eq!(rejected, var);
                    assert!(reason.starts_with("Must be a positive number"));
                }
                other => panic!("Expected InvalidValue for {}, got: {:?}", var, other),
            }
        }
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("REQUEST_TIMEOUT", "42");

        assert_eq!(Config::parse_env_u64("REQUEST_TIMEOUT", 10).unwrap(), 42);
        assert_eq!(Config::parse_env_u64("ACTIVITY_TIMEOUT_SECS", 10).unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_u64_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("REQUEST_TIMEOUT", "soon");

        assert!(Config::parse_env_u64("REQUEST_TIMEOUT", 10).is_err());
    }
}
