//! Serializable line settings.

use crate::builder::error::BuildError;
use crate::machine::DEFAULT_LINE;
use serde::{Deserialize, Serialize};

/// Settings a driver can load for a line.
///
/// Every field has a default, so `{}` is a valid configuration.
///
/// # Example
///
/// ```rust
/// use linecall::builder::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "line": "lobby", "silent": true }"#).unwrap();
/// assert_eq!(config.line, "lobby");
/// assert!(config.silent);
/// assert!(!config.record_history);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Name attached to every log event from the line
    pub line: String,

    /// Suppress the per-event state description
    pub silent: bool,

    /// Keep a history of applied events
    pub record_history: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            line: DEFAULT_LINE.to_string(),
            silent: false,
            record_history: false,
        }
    }
}

impl MachineConfig {
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        serde_json::from_str(json).map_err(|e| BuildError::InvalidConfig(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, BuildError> {
        serde_json::to_string_pretty(self).map_err(|e| BuildError::InvalidConfig(e.to_string()))
    }
}
