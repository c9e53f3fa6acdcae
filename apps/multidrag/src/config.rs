//! # Configuration
//!
//! Optional TOML configuration for the multidrag host.
//!
//! ```toml
//! platform = "mac"          # windows | mac | linux
//! log_format = "json"       # text | json
//! board = "board.json"      # board file used when --board is not given
//! ```
//!
//! Command-line flags take precedence over the file. `MULTIDRAG_LOG_FORMAT`
//! takes precedence over `log_format`.

use multidrag_core::{BoardError, Platform};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "multidrag.toml";

/// Environment variable overriding the log format.
pub const LOG_FORMAT_ENV: &str = "MULTIDRAG_LOG_FORMAT";

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parse a format name; anything but `json` means text.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Host configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub platform: Option<Platform>,
    pub log_format: Option<LogFormat>,
    pub board: Option<PathBuf>,
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, BoardError> {
        toml::from_str(text).map_err(|e| BoardError::SerializationError(format!("config: {}", e)))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `multidrag.toml` in the
    /// working directory is used if present, otherwise defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self, BoardError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|e| {
            BoardError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Platform to interpret modifiers for, falling back to the running OS.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::current)
    }

    /// Log format, with the environment variable taking precedence.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        match std::env::var(LOG_FORMAT_ENV) {
            Ok(name) => LogFormat::parse(&name),
            Err(_) => self.log_format.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_keys() {
        let config = Config::from_toml_str(
            r#"
            platform = "windows"
            log_format = "json"
            board = "boards/team.json"
            "#,
        )
        .expect("parse");

        assert_eq!(config.platform, Some(Platform::Windows));
        assert_eq!(config.log_format, Some(LogFormat::Json));
        assert_eq!(config.board, Some(PathBuf::from("boards/team.json")));
        assert_eq!(config.platform(), Platform::Windows);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Config::from_toml_str("").expect("parse"), Config::default());
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(matches!(
            Config::from_toml_str("colour = \"blue\""),
            Err(BoardError::SerializationError(_))
        ));
    }

    #[test]
    fn log_format_names() {
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
    }
}
