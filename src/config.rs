//! Client configuration parsing.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::client::{DEFAULT_FINALITY_TIMEOUT, SubmitOptions};

/// Client configuration loaded from a TOML file. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Node endpoint, for transports that want one.
    pub node_url: Option<String>,
    pub finality: FinalityConfig,
    pub logging: LoggingConfig,
}

/// How long to wait for submitted transactions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FinalityConfig {
    pub timeout_secs: u64,
    /// Treat a finalized but failed transaction as an error.
    pub check_success: bool,
}

impl Default for FinalityConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_FINALITY_TIMEOUT.as_secs(),
            check_success: true,
        }
    }
}

impl From<&FinalityConfig> for SubmitOptions {
    fn from(config: &FinalityConfig) -> Self {
        SubmitOptions {
            timeout: Duration::from_secs(config.timeout_secs),
            check_success: config.check_success,
        }
    }
}

/// Logging settings, consumed by the CLI's subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive, e.g. "info" or "move_abi_client=debug".
    pub level: String,
    pub format: LogFormat,
    /// "stdout", "stderr", or a file path (opened in append mode).
    pub output: String,
    /// ANSI colors, only honoured when the output is a terminal.
    pub color: bool,
    pub timestamps: bool,
    /// Include the module path of each event.
    pub target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            output: "stderr".to_string(),
            color: true,
            timestamps: true,
            target: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    pub fn submit_options(&self) -> SubmitOptions {
        SubmitOptions::from(&self.finality)
    }
}

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(String, std::io::Error),
    /// TOML parse error.
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Failed to read config file '{}': {}", path, e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ClientConfig::from_str("").unwrap();
        assert_eq!(config.node_url, None);
        assert_eq!(config.submit_options(), SubmitOptions::default());
        assert_eq!(config.submit_options().timeout, Duration::from_secs(120));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
node_url = "https://fullnode.example/v1"

[finality]
timeout_secs = 30
check_success = false

[logging]
level = "move_abi_client=debug"
format = "json"
output = "stdout"
color = false
timestamps = false
target = true
"#;
        let config = ClientConfig::from_str(toml).unwrap();
        assert_eq!(config.node_url.as_deref(), Some("https://fullnode.example/v1"));
        let options = config.submit_options();
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert!(!options.check_success);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.output, "stdout");
        assert!(config.logging.target);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = ClientConfig::from_str("[finality]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.finality.timeout_secs, 5);
        assert!(config.finality.check_success);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"warn\"").unwrap();
        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            ClientConfig::from_str("[finality]\ntimeout_secs = \"soon\""),
            Err(ConfigError::Parse(_))
        ));
        let err = ClientConfig::from_file("/nonexistent/move-abi.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/move-abi.toml"));
    }
}
