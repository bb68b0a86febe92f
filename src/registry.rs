//! Lines in service.
//!
//! A [`LineRegistry`] owns one machine per line and is the only place a
//! machine is allocated on the caller's behalf, so it is also the only place
//! [`MachineError::AllocationFailure`] can come from. [`SharedLine`] is the
//! wrapper to reach for when several threads must feed the same line.

use crate::builder::CallMachineBuilder;
use crate::core::{CallEvent, CallState, Step};
use crate::error::MachineError;
use crate::machine::CallMachine;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;
use uuid::Uuid;

/// Identifier of a provisioned line.
pub type LineId = Uuid;

/// Machines for every line currently in service.
#[derive(Debug, Default)]
pub struct LineRegistry {
    lines: HashMap<LineId, CallMachine>,
}

impl LineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring a new line into service with default settings.
    ///
    /// The line is named after its id.
    pub fn provision(&mut self) -> Result<LineId, MachineError> {
        self.reserve()?;
        let id = Uuid::new_v4();
        let machine = CallMachine::builder().line(id.to_string()).build()?;
        Ok(self.insert(id, machine))
    }

    /// Bring a new line into service from a configured builder.
    pub fn provision_with(&mut self, builder: CallMachineBuilder) -> Result<LineId, MachineError> {
        self.reserve()?;
        let machine = builder.build()?;
        Ok(self.insert(Uuid::new_v4(), machine))
    }

    /// Reserve the slot before the machine's own allocations happen.
    ///
    /// Failure here needs the allocator to refuse a one-entry growth, which no
    /// unit test can arrange without a custom global allocator.
    fn reserve(&mut self) -> Result<(), MachineError> {
        self.lines
            .try_reserve(1)
            .map_err(|_| MachineError::AllocationFailure {
                in_service: self.lines.len(),
            })
    }

    fn insert(&mut self, id: LineId, machine: CallMachine) -> LineId {
        info!(line = %machine.line(), %id, "line in service");
        self.lines.insert(id, machine);
        id
    }

    /// Feed one event to a line.
    pub fn dispatch(&mut self, id: LineId, event: CallEvent) -> Result<Step, MachineError> {
        let machine = self
            .lines
            .get_mut(&id)
            .ok_or(MachineError::UnknownLine(id))?;
        Ok(machine.apply(event))
    }

    pub fn state(&self, id: LineId) -> Result<CallState, MachineError> {
        self.get(id)
            .map(CallMachine::current_state)
            .ok_or(MachineError::UnknownLine(id))
    }

    pub fn get(&self, id: LineId) -> Option<&CallMachine> {
        self.lines.get(&id)
    }

    /// Take a line out of service, handing its machine back to the caller.
    pub fn retire(&mut self, id: LineId) -> Result<CallMachine, MachineError> {
        let machine = self.lines.remove(&id).ok_or(MachineError::UnknownLine(id))?;
        info!(line = %machine.line(), %id, "line retired");
        Ok(machine)
    }

    pub fn ids(&self) -> impl Iterator<Item = &LineId> {
        self.lines.keys()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A machine behind a mutex, for lines fed from more than one thread.
///
/// Each `apply` holds the lock for the whole read-compute-write, so
/// concurrent feeders are serialized.
#[derive(Clone, Debug)]
pub struct SharedLine {
    line: String,
    inner: Arc<Mutex<CallMachine>>,
}

impl SharedLine {
    pub fn new(machine: CallMachine) -> Self {
        Self {
            line: machine.line().to_string(),
            inner: Arc::new(Mutex::new(machine)),
        }
    }

    pub fn apply(&self, event: CallEvent) -> Result<Step, MachineError> {
        Ok(self.lock()?.apply(event))
    }

    pub fn current_state(&self) -> Result<CallState, MachineError> {
        Ok(self.lock()?.current_state())
    }

    /// Run `f` with exclusive access to the machine.
    pub fn with_machine<R>(&self, f: impl FnOnce(&mut CallMachine) -> R) -> Result<R, MachineError> {
        let mut guard = self.lock()?;
        Ok(f(&mut *guard))
    }

    fn lock(&self) -> Result<MutexGuard<'_, CallMachine>, MachineError> {
        self.inner.lock().map_err(|_| MachineError::LinePoisoned {
            line: self.line.clone(),
        })
    }
}
