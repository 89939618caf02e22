//! Configuration System for fuzzytip
//!
//! Provides a small layered configuration system:
//! - TOML configuration files
//! - Environment variable overrides
//!
//! The fuzzy breakpoints and grid bounds are fixed constants of the
//! engine and deliberately not configurable; configuration covers the
//! ambient surfaces (logging, HTTP server) only.
//!
//! # Configuration File Locations
//!
//! Configuration files are searched in order (first found wins):
//! 1. `./fuzzytip.toml` - Project-local configuration
//! 2. `~/.config/fuzzytip/config.toml` - User configuration (XDG)
//! 3. `/etc/fuzzytip/config.toml` - System-wide configuration
//!
//! # Environment Variables
//!
//! - `FUZZYTIP_LOG_LEVEL` - Logging verbosity (quiet, normal, verbose, debug)
//! - `FUZZYTIP_SERVER_PORT` - HTTP server port
//! - `FUZZYTIP_SERVER_HOST` - HTTP server bind host
//! - `FUZZYTIP_CORS` - Enable permissive CORS (true/false)
//!
//! # Example Configuration
//!
//! ```toml
//! # fuzzytip.toml
//!
//! [general]
//! log_level = "normal"
//!
//! [server]
//! port = 8080
//! host = "0.0.0.0"
//! cors_enabled = true
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{TipError, TipResult};

// ============================================================================
// Configuration Schema
// ============================================================================

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TipConfig {
    /// General settings
    pub general: GeneralConfig,
    /// HTTP server settings
    pub server: ServerConfig,
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Logging level
    pub log_level: LogLevel,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Normal,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,
    /// Server host
    pub host: String,
    /// Enable CORS for browser access
    pub cors_enabled: bool,
    /// Maximum request body size (bytes)
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            cors_enabled: true,
            max_body_size: 64 * 1024,
        }
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Log level options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "quiet" | "q" | "0" => Some(LogLevel::Quiet),
            "normal" | "n" | "1" => Some(LogLevel::Normal),
            "verbose" | "v" | "2" => Some(LogLevel::Verbose),
            "debug" | "d" | "3" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    /// Tracing filter directive corresponding to this level
    pub fn filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Normal => "info",
            LogLevel::Verbose => "debug",
            LogLevel::Debug => "trace",
        }
    }
}

// ============================================================================
// Configuration Loading
// ============================================================================

impl TipConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from default locations
    ///
    /// Searches for config files in order:
    /// 1. ./fuzzytip.toml
    /// 2. ~/.config/fuzzytip/config.toml
    /// 3. /etc/fuzzytip/config.toml
    ///
    /// Then applies environment variable overrides.
    pub fn load() -> TipResult<Self> {
        let mut config = Self::default();

        for path in Self::config_paths() {
            if path.exists() {
                config = Self::load_from_file(&path)?;
                break;
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> TipResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TipError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn load_from_str(content: &str) -> TipResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Get the list of config file search paths
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Project-local
        paths.push(PathBuf::from("./fuzzytip.toml"));

        // XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("fuzzytip").join("config.toml"));
        }

        // System-wide (Unix only)
        #[cfg(unix)]
        paths.push(PathBuf::from("/etc/fuzzytip/config.toml"));

        paths
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("FUZZYTIP_LOG_LEVEL") {
            if let Some(level) = LogLevel::from_str(&val) {
                self.general.log_level = level;
            }
        }

        if let Ok(val) = env::var("FUZZYTIP_SERVER_PORT") {
            if let Ok(port) = val.parse::<u16>() {
                self.server.port = port;
            }
        }

        if let Ok(val) = env::var("FUZZYTIP_SERVER_HOST") {
            self.server.host = val;
        }

        if let Ok(val) = env::var("FUZZYTIP_CORS") {
            self.server.cors_enabled = val == "true" || val == "1" || val == "yes";
        }
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> TipResult<String> {
        toml::to_string_pretty(self).map_err(|e| TipError::config(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TipConfig::new();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.general.log_level, LogLevel::Normal);
        assert!(config.server.cors_enabled);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [general]
            log_level = "verbose"

            [server]
            port = 9000
            cors_enabled = false
        "#;

        let config = TipConfig::load_from_str(toml).unwrap();
        assert_eq!(config.general.log_level, LogLevel::Verbose);
        assert_eq!(config.server.port, 9000);
        assert!(!config.server.cors_enabled);
        // Unspecified fields keep their defaults
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_config_syntax() {
        let result = TipConfig::load_from_str("[server]\nport = \"not a port\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!(LogLevel::from_str("quiet"), Some(LogLevel::Quiet));
        assert_eq!(LogLevel::from_str("verbose"), Some(LogLevel::Verbose));
        assert_eq!(LogLevel::from_str("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str("nope"), None);
    }

    #[test]
    fn test_log_level_filter_directive() {
        assert_eq!(LogLevel::Quiet.filter_directive(), "error");
        assert_eq!(LogLevel::Normal.filter_directive(), "info");
        assert_eq!(LogLevel::Debug.filter_directive(), "trace");
    }

    #[test]
    fn test_env_overrides() {
        // Single test for all env-var cases: parallel tests mutating the
        // same process environment would race
        let mut config = TipConfig::new();

        env::set_var("FUZZYTIP_SERVER_PORT", "9999");
        env::set_var("FUZZYTIP_LOG_LEVEL", "debug");
        env::set_var("FUZZYTIP_CORS", "false");
        config.apply_env_overrides();

        assert_eq!(config.server.port, 9999);
        assert_eq!(config.general.log_level, LogLevel::Debug);
        assert!(!config.server.cors_enabled);

        // Unparseable overrides leave the current values intact
        env::set_var("FUZZYTIP_SERVER_PORT", "not a port");
        env::set_var("FUZZYTIP_LOG_LEVEL", "shouty");
        config.apply_env_overrides();

        env::remove_var("FUZZYTIP_SERVER_PORT");
        env::remove_var("FUZZYTIP_LOG_LEVEL");
        env::remove_var("FUZZYTIP_CORS");

        assert_eq!(config.server.port, 9999);
        assert_eq!(config.general.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_config_paths() {
        let paths = TipConfig::config_paths();
        assert!(!paths.is_empty());
        assert!(paths[0].ends_with("fuzzytip.toml"));
    }

    #[test]
    fn test_serialize_config() {
        let toml = TipConfig::new().to_toml().unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[server]"));
    }
}
