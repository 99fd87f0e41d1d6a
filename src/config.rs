//! # Configuration Management
//!
//! Connection parameters for one device: the pre-shared token, the
//! device's address and identifier, and optional timing overrides.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - TOML strings via `from_toml()`
//! - Environment variables via `from_env()`
//!
//! Validation is a separate, explicit step so callers can collect every
//! problem at once instead of failing on the first.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::crypto::TOKEN_LEN;
use crate::error::{ProtocolError, Result};

/// Connection settings for a single device.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DeviceConfig {
    /// Pre-shared token as 32 hex characters.
    pub token: String,

    /// Device IP address.
    pub ip: String,

    /// Raw device identifier as carried in the frame header.
    pub device_id: u32,

    /// Enable debug-level logging.
    #[serde(default)]
    pub debug_enabled: bool,

    /// Per-attempt reply timeout override, in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Retry budget override (attempts beyond the first).
    #[serde(default)]
    pub retry_count: Option<u32>,
}

impl DeviceConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to read config file: {e}")))?;
        Self::from_toml(&contents)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables.
    ///
    /// `ROBOVAC_TOKEN`, `ROBOVAC_IP`, and `ROBOVAC_DEVICE_ID` are
    /// required; `ROBOVAC_DEBUG`, `ROBOVAC_TIMEOUT_MS`, and
    /// `ROBOVAC_RETRY_COUNT` are optional.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        config.token = std::env::var("ROBOVAC_TOKEN")
            .map_err(|_| ProtocolError::ConfigError("ROBOVAC_TOKEN is not set".to_string()))?;
        config.ip = std::env::var("ROBOVAC_IP")
            .map_err(|_| ProtocolError::ConfigError("ROBOVAC_IP is not set".to_string()))?;

        let device_id = std::env::var("ROBOVAC_DEVICE_ID")
            .map_err(|_| ProtocolError::ConfigError("ROBOVAC_DEVICE_ID is not set".to_string()))?;
        config.device_id = device_id.parse::<u32>().map_err(|_| {
            ProtocolError::ConfigError(format!("ROBOVAC_DEVICE_ID is not a u32: {device_id}"))
        })?;

        if let Ok(debug) = std::env::var("ROBOVAC_DEBUG") {
            config.debug_enabled = matches!(debug.as_str(), "1" | "true" | "yes");
        }
        if let Ok(timeout) = std::env::var("ROBOVAC_TIMEOUT_MS") {
            if let Ok(val) = timeout.parse::<u64>() {
                config.timeout_ms = Some(val);
            }
        }
        if let Ok(retries) = std::env::var("ROBOVAC_RETRY_COUNT") {
            if let Ok(val) = retries.parse::<u32>() {
                config.retry_count = Some(val);
            }
        }

        Ok(config)
    }

    /// Validate the configuration for common issues and misconfigurations.
    ///
    /// Returns a list of validation errors. Empty list means the
    /// configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.token.len() != TOKEN_LEN * 2 {
            errors.push(format!(
                "token must be {} hex characters, found {}",
                TOKEN_LEN * 2,
                self.token.len()
            ));
        } else if !self.token.chars().all(|c| c.is_ascii_hexdigit()) {
            errors.push("token contains non-hex characters".to_string());
        }

        if self.ip.parse::<std::net::IpAddr>().is_err() {
            errors.push(format!("ip is not a valid address: {}", self.ip));
        }

        if self.timeout_ms == Some(0) {
            errors.push("timeout_ms must be greater than zero".to_string());
        }

        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}
