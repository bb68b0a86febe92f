//! Build errors for machine configuration.

use thiserror::Error;

/// Errors that can occur when configuring a call machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Line name is empty. Call .line(name) with a non-empty name")]
    EmptyLineName,

    #[error("Invalid machine configuration: {0}")]
    InvalidConfig(String),
}
