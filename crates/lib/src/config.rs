//! Per-tree address syntax configuration.
//!
//! Every [`Tree`](crate::Tree) owns its own `TreeConfig`, so two trees in one
//! process may use different separators without affecting each other.
//!
//! ```
//! use fractree::config::TreeConfig;
//!
//! let config: TreeConfig = serde_json::from_str(r#"{"separator": "/"}"#)?;
//! assert_eq!(config.separator, "/");
//! assert_eq!(config.parent_token, "^");
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_PARENT_TOKEN, DEFAULT_SEPARATOR};

/// Errors from validating a [`TreeConfig`].
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The separator is empty.
    #[error("address separator must not be empty")]
    EmptySeparator,

    /// The parent token is empty or would be split apart by the separator.
    #[error("parent token '{token}' is unusable with separator '{separator}'")]
    InvalidParentToken { token: String, separator: String },
}

// Conversion from ConfigError to the main Error type
impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Config(err)
    }
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_parent_token() -> String {
    DEFAULT_PARENT_TOKEN.to_string()
}

/// Address syntax of one tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Joins segments into one string address.
    #[serde(default = "default_separator")]
    pub separator: String,

    /// A standalone segment equal to this walks to the parent.
    #[serde(default = "default_parent_token")]
    pub parent_token: String,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            parent_token: default_parent_token(),
        }
    }
}

impl TreeConfig {
    pub fn new(separator: impl Into<String>, parent_token: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            parent_token: parent_token.into(),
        }
    }

    /// Checks that addresses written with this syntax can be tokenized.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.separator.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }
        if self.parent_token.is_empty() || self.parent_token.contains(&self.separator) {
            return Err(ConfigError::InvalidParentToken {
                token: self.parent_token.clone(),
                separator: self.separator.clone(),
            });
        }
        Ok(())
    }
}
