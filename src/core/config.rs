//! Configuration management for LumaEngine.
//!
//! Handles loading and saving configuration from TOML files, with
//! environment variable overrides applied on top.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Name of the project-local configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".luma.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Cross-origin settings for the dashboard client
    pub cors: CorsConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Workflow board settings
    pub board: BoardConfig,

    /// Requirements analyzer settings
    pub analyzer: AnalyzerConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,

    /// Port to bind
    pub port: u16,

    /// Prefix every API route is mounted under ("" mounts at the root)
    pub api_prefix: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Cross-origin settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins (empty allows any origin)
    pub allowed_origins: Vec<String>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive (trace, debug, info, warn, error)
    pub level: String,

    /// Whether to include the module target in log lines
    pub with_target: bool,
}

/// Workflow board settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// JSON file with the items to seed the board with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

/// Requirements analyzer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Analysis strategy (only "keyword" is built in)
    pub strategy: String,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Looks for config in:
    /// 1. `.luma.toml` in current directory
    /// 2. `~/.config/luma/config.toml`
    /// 3. Falls back to defaults
    ///
    /// Environment overrides are applied afterwards.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match Self::discover() {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit path, then apply env overrides.
    pub fn load_with_path(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Self::load();
        };
        let mut config = Self::load_from_file(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Find the config file that `load` would use, if any.
    pub fn discover() -> Option<PathBuf> {
        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Some(local_config);
        }

        Self::config_dir().map(|dir| dir.join("config.toml")).filter(|path| path.exists())
    }

    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("luma"))
    }

    /// Apply `LUMA_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        if let Ok(host) = std::env::var("LUMA_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("LUMA_PORT") {
            self.server.port =
                port.parse().with_context(|| format!("LUMA_PORT is not a valid port: {port}"))?;
        }
        if let Ok(prefix) = std::env::var("LUMA_API_PREFIX") {
            self.server.api_prefix = prefix;
        }
        if let Ok(level) = std::env::var("LUMA_LOG") {
            self.logging.level = level;
        }
        if let Ok(seed) = std::env::var("LUMA_SEED_FILE") {
            self.board.seed_file = Some(PathBuf::from(seed));
        }
        Ok(())
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("server.port must be non-zero");
        }

        if self.server.request_timeout_secs == 0 {
            anyhow::bail!("server.request_timeout_secs must be non-zero");
        }

        let prefix = &self.server.api_prefix;
        if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
            anyhow::bail!("server.api_prefix must start with '/' and must not end with '/': {prefix}");
        }

        if !crate::analysis::STRATEGIES.contains(&self.analyzer.strategy.as_str()) {
            anyhow::bail!(
                "analyzer.strategy '{}' is not supported (expected one of: {})",
                self.analyzer.strategy,
                crate::analysis::STRATEGIES.join(", ")
            );
        }

        Ok(())
    }

    /// Socket address string for the server.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            api_prefix: String::new(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), with_target: false }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { strategy: "keyword".to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert!(config.server.api_prefix.is_empty());
        assert_eq!(config.analyzer.strategy, "keyword");
        assert!(config.board.seed_file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[analyzer]"));
        assert!(!toml_str.contains("seed_file"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [server]
            port = 9090
            api_prefix = "/api/v1"

            [board]
            seed_file = "items.json"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.api_prefix, "/api/v1");
        assert_eq!(config.board.seed_file, Some(PathBuf::from("items.json")));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_rejects_bad_prefix() {
        let mut config = Config::default();
        config.server.api_prefix = "api".to_string();
        assert!(config.validate().is_err());

        config.server.api_prefix = "/api/".to_string();
        assert!(config.validate().is_err());

        config.server.api_prefix = "/api".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_strategy() {
        let mut config = Config::default();
        config.analyzer.strategy = "gpt".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("gpt"));
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.server.request_timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));
    }

    #[test]
    fn test_bind_address() {
        let config = Config::default();
        assert_eq!(config.bind_address(), "127.0.0.1:8000");
    }
}
