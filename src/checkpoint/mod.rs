//! Checkpoint and resume for call machines.
//!
//! A line's only persistent datum is its current state tag. A checkpoint
//! stores that tag together with the line name and, when the machine keeps
//! one, its history. Observers are not serializable and must be installed
//! again through the builder on resume.

use crate::builder::CallMachineBuilder;
use crate::core::{transition, CallState, StateHistory};
use crate::machine::CallMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::info;
use uuid::Uuid;

pub mod error;

pub use error::{CheckpointError, CheckpointViolation};

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a line.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Name of the line the machine serves
    pub line: String,

    /// Current state of the machine
    pub current_state: CallState,

    /// Transition history, if the machine records one
    pub history: Option<StateHistory>,
}

impl Checkpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

type Check = Validation<(), NonEmptyVec<CheckpointViolation>>;

fn check(ok: bool, violation: impl FnOnce() -> CheckpointViolation) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

impl Checkpoint {
    /// Validate the checkpoint, accumulating every violation.
    ///
    /// An unknown version is reported on its own, since nothing else in the
    /// snapshot can be trusted in that case.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let mut checks: Vec<Check> = Vec::new();

        checks.push(check(!self.line.trim().is_empty(), || {
            CheckpointViolation::EmptyLineName
        }));

        if let Some(history) = &self.history {
            let mut previous: Option<CallState> = None;
            for (index, entry) in history.transitions().iter().enumerate() {
                if let Some(expected) = previous {
                    checks.push(check(entry.from == expected, || {
                        CheckpointViolation::BrokenChain {
                            index,
                            expected,
                            found: entry.from,
                        }
                    }));
                }

                let step = transition(entry.from, entry.event);
                checks.push(check(entry.to == step.to, || {
                    CheckpointViolation::TableMismatch {
                        index,
                        from: entry.from,
                        event: entry.event,
                        recorded: entry.to,
                        expected: step.to,
                    }
                }));
                checks.push(check(entry.kind == step.kind, || {
                    CheckpointViolation::KindMismatch {
                        index,
                        from: entry.from,
                        event: entry.event,
                        recorded: entry.kind,
                        expected: step.kind,
                    }
                }));

                previous = Some(entry.to);
            }

            if let Some(recorded) = previous {
                checks.push(check(self.current_state == recorded, || {
                    CheckpointViolation::StateMismatch {
                        current: self.current_state,
                        recorded,
                    }
                }));
            }
        }

        match Validation::all_vec(checks).map(|_| ()) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(violations) => Err(CheckpointError::ValidationFailed(
                violations.iter().cloned().collect(),
            )),
        }
    }
}

impl CallMachine {
    /// Snapshot the machine.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            line: self.line.clone(),
            current_state: self.current,
            history: self.history.clone(),
        }
    }

    /// Rebuild a machine from a checkpoint with default settings.
    pub fn resume(checkpoint: Checkpoint) -> Result<Self, CheckpointError> {
        Self::resume_with(CallMachineBuilder::new(), checkpoint)
    }

    /// Rebuild a machine from a checkpoint, taking logging and observer
    /// settings from `builder`.
    ///
    /// The line name, state and history come from the checkpoint. A machine
    /// configured to record history starts a fresh one if the checkpoint
    /// carries none.
    pub fn resume_with(
        builder: CallMachineBuilder,
        checkpoint: Checkpoint,
    ) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;

        let mut machine = builder.line(checkpoint.line).build()?;

        machine.current = checkpoint.current_state;
        if checkpoint.history.is_some() {
            machine.history = checkpoint.history;
        }

        info!(
            line = %machine.line,
            checkpoint = %checkpoint.id,
            state = %machine.current,
            "line resumed from checkpoint"
        );
        Ok(machine)
    }
}
