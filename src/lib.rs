//! Linecall: call-control state machine for a telephony line
//!
//! A line endpoint reacts to a stream of telephony events (off-hook, digits,
//! incoming call, ...) by moving between six call states. The transition
//! table is a pure, total function; everything around it (logging, history,
//! reject reporting, persistence, line provisioning) lives in thin layers on
//! top.
//!
//! # Core Concepts
//!
//! - **State**: [`CallState`], one of Idle, Dial, Busy, Alerting, Connected, Ringing
//! - **Event**: [`CallEvent`], one of ten telephony indications
//! - **Transition**: [`transition`](crate::core::transition), defined for every (state, event) pair
//! - **Machine**: [`CallMachine`], an owned value holding one line's state
//!
//! # Example
//!
//! ```rust
//! use linecall::{CallEvent, CallMachine, CallState, StepKind};
//!
//! let mut machine = CallMachine::new();
//!
//! machine.apply(CallEvent::IncomingCall);
//! machine.apply(CallEvent::Pickup);
//! assert_eq!(machine.current_state(), CallState::Connected);
//!
//! // Any event clears a connected call.
//! let step = machine.apply(CallEvent::Timeout);
//! assert_eq!(step.to, CallState::Idle);
//! assert_eq!(step.kind, StepKind::Released);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod error;
pub mod machine;
pub mod observer;
pub mod registry;

// Re-export commonly used types
pub use builder::{BuildError, CallMachineBuilder, MachineConfig};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use crate::core::{CallEvent, CallState, State, StateHistory, StateTransition, Step, StepKind};
pub use error::MachineError;
pub use machine::CallMachine;
pub use observer::{InvalidTransition, RejectObserver};
pub use registry::{LineId, LineRegistry, SharedLine};
