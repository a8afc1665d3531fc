//! Lowering configuration
//!
//! Read from the `[lower]` table of an `og.toml` file:
//!
//! ```toml
//! [lower]
//! self_name = "this"
//! first_line = 1
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Options controlling a lowering run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LowerOptions {
    /// Canonical name every receiver self-reference is rewritten to
    pub self_name: String,
    /// Initial value of the line counter
    pub first_line: u32,
}

impl Default for LowerOptions {
    fn default() -> Self {
        Self {
            self_name: "this".to_string(),
            first_line: 1,
        }
    }
}

/// Configuration file failure
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file {}", path.display())]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid TOML or has unknown keys
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// `self_name` is not an identifier
    #[error("`self_name` must be a non-empty identifier, got `{0}`")]
    InvalidSelfName(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    lower: LowerOptions,
}

impl LowerOptions {
    /// Parse options from the text of an `og.toml` document
    ///
    /// A document without a `[lower]` table yields the defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        file.lower.validated()
    }

    /// Load options from an `og.toml` file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let valid = self
            .self_name
            .chars()
            .next()
            .is_some_and(|first| first.is_alphabetic() || first == '_')
            && self
                .self_name
                .chars()
                .all(|character| character.is_alphanumeric() || character == '_');
        if valid {
            Ok(self)
        } else {
            Err(ConfigError::InvalidSelfName(self.self_name))
        }
    }
}
