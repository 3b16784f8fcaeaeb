//! Configuration file parsing for the server.
//!
//! Loads settings from a TOML file with a `[server]` table (bind address,
//! port and browser UI directory) and an `[extractor]` table (model, output file, timeout, domain).
//! Credentials never come from the file; they are supplied from the
//! environment at startup.

use pharmextract_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A field holds an unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 5000)
    pub bind_port: u16,

    /// Directory holding the browser UI (`index.html` plus assets)
    pub static_dir: PathBuf,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 5000,
            static_dir: PathBuf::from("static"),
        }
    }
}

/// Complete server configuration loaded from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener settings
    pub server: ListenConfig,

    /// Extraction service settings
    pub extractor: ExtractorConfig,
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field for usable values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_address.trim().is_empty() {
            return Err(ConfigError::Invalid("bind_address must not be empty".to_string()));
        }
        self.extractor.validate().map_err(ConfigError::Invalid)
    }

    /// Apply command-line and environment overrides
    ///
    /// A blank API key counts as no key.
    pub fn with_overrides(
        mut self,
        bind: Option<SocketAddr>,
        output: Option<PathBuf>,
        api_key: Option<String>,
    ) -> Self {
        if let Some(addr) = bind {
            self.server.bind_address = addr.ip().to_string();
            self.server.bind_port = addr.port();
        }
        if let Some(path) = output {
            self.extractor.output_path = path;
        }
        if let Some(key) = api_key.filter(|key| !key.trim().is_empty()) {
            self.extractor.api_key = Some(key);
        }
        self
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmextract_domain::ExamplesType;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert_eq!(config.extractor.model_id, "gemini-2.5-pro");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            [server]
            bind_address = "0.0.0.0"
            bind_port = 9000
            static_dir = "/usr/share/pharmextract/ui"

            [extractor]
            model_id = "gemini-2.5-flash"
            output_path = "/var/lib/pharmextract/results.jsonl"
            request_timeout_secs = 30
            default_examples_type = "legal"
        "#;

        let config = ServerConfig::from_toml(toml).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.server.static_dir, PathBuf::from("/usr/share/pharmextract/ui"));
        assert_eq!(config.extractor.model_id, "gemini-2.5-flash");
        assert_eq!(config.extractor.request_timeout_secs, 30);
        assert_eq!(config.extractor.default_examples_type, ExamplesType::Legal);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ServerConfig::from_toml("").unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert_eq!(config.server.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let result = ServerConfig::from_toml("[extractor]\nrequest_timeout_secs = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = ServerConfig::from_toml("[extractor]\ndefault_examples_type = \"astrology\"\n");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nbind_port = 8081").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.bind_port, 8081);

        let missing = ServerConfig::from_file("/nonexistent/pharmextract.toml");
        assert!(matches!(missing, Err(ConfigError::FileRead(_))));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::default().with_overrides(
            Some("0.0.0.0:8080".parse().unwrap()),
            Some(PathBuf::from("out.jsonl")),
            Some("key".to_string()),
        );

        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.extractor.output_path, PathBuf::from("out.jsonl"));
        assert_eq!(config.extractor.api_key.as_deref(), Some("key"));

        let config = ServerConfig::default().with_overrides(None, None, Some("  ".to_string()));
        assert!(config.extractor.api_key.is_none());
    }
}
