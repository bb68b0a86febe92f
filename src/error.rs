//! Errors surfaced by machine provisioning and line access.
//!
//! Applying an event never fails, so nothing here comes from the
//! transition table itself.

use crate::builder::BuildError;
use crate::registry::LineId;
use thiserror::Error;

/// Errors that can occur outside the transition function
#[derive(Debug, Error)]
pub enum MachineError {
    /// Storage for a new line could not be reserved
    #[error("Allocation failed while provisioning line (lines in service: {in_service})")]
    AllocationFailure { in_service: usize },

    #[error("No line with id {0}")]
    UnknownLine(LineId),

    /// A thread panicked while holding a shared line
    #[error("Shared line '{line}' is poisoned")]
    LinePoisoned { line: String },

    #[error(transparent)]
    Build(#[from] BuildError),
}
