//! Checkpoint error types.

use crate::builder::BuildError;
use crate::core::{CallEvent, CallState, StepKind};
use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint data failed validation; every problem found is listed
    #[error("Checkpoint validation failed with {} violation(s)", .0.len())]
    ValidationFailed(Vec<CheckpointViolation>),

    /// The builder supplied for resume could not build a machine
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// A single inconsistency found while validating a checkpoint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckpointViolation {
    #[error("Line name is empty")]
    EmptyLineName,

    #[error("History entry {index} goes {from} -[{event}]-> {recorded}, table gives {expected}")]
    TableMismatch {
        index: usize,
        from: CallState,
        event: CallEvent,
        recorded: CallState,
        expected: CallState,
    },

    #[error("History entry {index} labels {from} -[{event}]-> as {recorded:?}, table gives {expected:?}")]
    KindMismatch {
        index: usize,
        from: CallState,
        event: CallEvent,
        recorded: StepKind,
        expected: StepKind,
    },

    #[error("History entry {index} starts in {found}, previous entry ended in {expected}")]
    BrokenChain {
        index: usize,
        expected: CallState,
        found: CallState,
    },

    #[error("Current state {current} does not match last recorded state {recorded}")]
    StateMismatch {
        current: CallState,
        recorded: CallState,
    },
}
