//! Builder for constructing call machines.

use crate::builder::config::MachineConfig;
use crate::builder::error::BuildError;
use crate::core::{CallState, StateHistory};
use crate::machine::CallMachine;
use crate::observer::{RejectObserver, SharedObserver};
use std::sync::Arc;

/// Builder for constructing call machines with a fluent API.
///
/// # Example
///
/// ```rust
/// use linecall::builder::CallMachineBuilder;
/// use linecall::observer::InvalidTransition;
///
/// let machine = CallMachineBuilder::new()
///     .line("reception")
///     .record_history(true)
///     .on_reject(|r: &InvalidTransition| eprintln!("{r}"))
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.line(), "reception");
/// ```
#[derive(Default)]
pub struct CallMachineBuilder {
    config: MachineConfig,
    observer: Option<SharedObserver>,
}

impl CallMachineBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from loaded settings.
    pub fn from_config(config: MachineConfig) -> Self {
        Self {
            config,
            observer: None,
        }
    }

    /// Set the line name used in log events.
    pub fn line(mut self, name: impl Into<String>) -> Self {
        self.config.line = name.into();
        self
    }

    /// Suppress per-event state descriptions.
    pub fn silent(mut self) -> Self {
        self.config.silent = true;
        self
    }

    pub fn record_history(mut self, enabled: bool) -> Self {
        self.config.record_history = enabled;
        self
    }

    /// Install an observer for invalid-input resets.
    pub fn on_reject<O>(mut self, observer: O) -> Self
    where
        O: RejectObserver + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Install an observer shared with other machines.
    pub fn observer(mut self, observer: SharedObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Build the machine in Idle.
    /// Returns an error if the line name is empty.
    pub fn build(self) -> Result<CallMachine, BuildError> {
        if self.config.line.trim().is_empty() {
            return Err(BuildError::EmptyLineName);
        }

        Ok(CallMachine {
            line: self.config.line,
            current: CallState::Idle,
            silent: self.config.silent,
            history: self.config.record_history.then(StateHistory::new),
            observer: self.observer,
        })
    }
}
