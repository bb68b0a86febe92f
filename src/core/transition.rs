//! The transition table.
//!
//! `transition` is total over every (state, event) pair and has no side
//! effects. The machine layer adds logging, history and reject reporting on
//! top of the [`Step`] it returns.

use super::call::CallState;
use super::event::CallEvent;
use super::state::State;
use serde::{Deserialize, Serialize};

/// How an event was resolved by the current state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum StepKind {
    /// The event is one the state handles explicitly
    Handled,

    /// Idle's default branch: the state is left unchanged
    Ignored,

    /// Busy or Connected catch-all: the call is cleared back to Idle
    Released,

    /// Dial, Alerting or Ringing default branch: invalid input, back to Idle
    Rejected,
}

/// Outcome of applying one event to one state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Step {
    pub from: CallState,
    pub event: CallEvent,
    pub to: CallState,
    pub kind: StepKind,
}

impl Step {
    pub fn is_rejected(&self) -> bool {
        self.kind == StepKind::Rejected
    }

    /// The line emitted for the state the event was evaluated in.
    pub fn description(&self) -> String {
        self.from.description()
    }

    /// True when the step left the state unchanged.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Resolve `event` against `state`.
///
/// # Example
///
/// ```rust
/// use linecall::core::{transition, CallEvent, CallState, StepKind};
///
/// let step = transition(CallState::Idle, CallEvent::OffHook);
/// assert_eq!(step.to, CallState::Dial);
/// assert_eq!(step.kind, StepKind::Handled);
///
/// let step = transition(CallState::Dial, CallEvent::Busy);
/// assert_eq!(step.to, CallState::Idle);
/// assert_eq!(step.kind, StepKind::Rejected);
/// ```
pub fn transition(state: CallState, event: CallEvent) -> Step {
    use CallEvent as E;
    use CallState as S;

    let (to, kind) = match (state, event) {
        (S::Idle, E::OffHook) => (S::Dial, StepKind::Handled),
        (S::Idle, E::IncomingCall) => (S::Ringing, StepKind::Handled),
        (S::Idle, _) => (S::Idle, StepKind::Ignored),

        (S::Dial, E::Digits) => (S::Alerting, StepKind::Handled),
        (S::Dial, E::OnHook) => (S::Idle, StepKind::Handled),
        (S::Dial, _) => (S::Idle, StepKind::Rejected),

        (S::Busy, _) => (S::Idle, StepKind::Released),

        (S::Alerting, E::Connected) => (S::Connected, StepKind::Handled),
        (S::Alerting, _) => (S::Idle, StepKind::Rejected),

        (S::Connected, _) => (S::Idle, StepKind::Released),

        (S::Ringing, E::Pickup) => (S::Connected, StepKind::Handled),
        (S::Ringing, _) => (S::Idle, StepKind::Rejected),
    };

    Step {
        from: state,
        event,
        to,
        kind,
    }
}
