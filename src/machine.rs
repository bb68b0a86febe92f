//! Call machine that owns a line's state and applies events to it.

use crate::builder::CallMachineBuilder;
use crate::core::{transition, CallEvent, CallState, State, StateHistory, StateTransition, Step};
use crate::observer::{InvalidTransition, SharedObserver};
use chrono::Utc;
use std::fmt;
use tracing::{debug, info, warn};

/// Line name used when none is configured.
pub const DEFAULT_LINE: &str = "line";

/// A single telephony line's call-control state machine.
///
/// The machine is a plain owned value: `apply` takes `&mut self`, so a
/// machine has exactly one writer at a time. Distinct machines share nothing.
///
/// # Example
///
/// ```rust
/// use linecall::{CallEvent, CallMachine, CallState};
///
/// let mut machine = CallMachine::new();
/// machine.apply(CallEvent::OffHook);
/// machine.apply(CallEvent::Digits);
/// assert_eq!(machine.current_state(), CallState::Alerting);
/// ```
#[derive(Clone)]
pub struct CallMachine {
    pub(crate) line: String,
    pub(crate) current: CallState,
    pub(crate) silent: bool,
    pub(crate) history: Option<StateHistory>,
    pub(crate) observer: Option<SharedObserver>,
}

impl CallMachine {
    /// Create a machine in Idle with default settings.
    pub fn new() -> Self {
        Self {
            line: DEFAULT_LINE.to_string(),
            current: CallState::Idle,
            silent: false,
            history: None,
            observer: None,
        }
    }

    pub fn builder() -> CallMachineBuilder {
        CallMachineBuilder::new()
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> CallState {
        self.current
    }

    /// Recorded history, if the machine was built with history enabled.
    pub fn history(&self) -> Option<&StateHistory> {
        self.history.as_ref()
    }

    /// Apply one event.
    ///
    /// Logs the description of the state being evaluated, resolves the event
    /// through the transition table, reports rejected input to the observer
    /// and records the step. Never fails.
    pub fn apply(&mut self, event: CallEvent) -> Step {
        if !self.silent {
            info!(line = %self.line, %event, "{}", self.current.description());
        }

        let step = transition(self.current, event);

        if let Some(rejection) = InvalidTransition::from_step(&step) {
            warn!(
                line = %self.line,
                state = %rejection.state,
                event = %rejection.event,
                "invalid input, resetting line to Idle"
            );
            if let Some(observer) = &self.observer {
                observer.on_reject(&rejection);
            }
        }

        if let Some(history) = self.history.take() {
            self.history = Some(history.record(StateTransition {
                from: step.from,
                to: step.to,
                event: step.event,
                kind: step.kind,
                timestamp: Utc::now(),
            }));
        }

        if !step.is_self_loop() {
            debug!(
                line = %self.line,
                from = %step.from,
                to = %step.to,
                kind = ?step.kind,
                "transition"
            );
        }
        self.current = step.to;
        step
    }

    /// Apply events in order and return the resulting state.
    pub fn apply_all<I>(&mut self, events: I) -> CallState
    where
        I: IntoIterator<Item = CallEvent>,
    {
        for event in events {
            self.apply(event);
        }
        self.current
    }
}

impl Default for CallMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CallMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallMachine")
            .field("line", &self.line)
            .field("current", &self.current)
            .field("silent", &self.silent)
            .field("history", &self.history.as_ref().map(StateHistory::len))
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StepKind;
    use std::sync::{Arc, Mutex};

    #[test]
    fn new_machine_starts_idle() {
        let machine = CallMachine::new();
        assert_eq!(machine.current_state(), CallState::Idle);
        assert_eq!(machine.line(), DEFAULT_LINE);
        assert!(machine.history().is_none());
    }

    #[test]
    fn outgoing_call_flow() {
        let mut machine = CallMachine::new();

        assert_eq!(machine.apply(CallEvent::OffHook).to, CallState::Dial);
        assert_eq!(machine.apply(CallEvent::Digits).to, CallState::Alerting);
        assert_eq!(machine.apply(CallEvent::Connected).to, CallState::Connected);

        let release = machine.apply(CallEvent::OnHook);
        assert_eq!(release.to, CallState::Idle);
        assert_eq!(release.kind, StepKind::Released);
        assert_eq!(machine.current_state(), CallState::Idle);
    }

    #[test]
    fn step_reports_description_of_evaluated_state() {
        let mut machine = CallMachine::new();
        machine.apply(CallEvent::IncomingCall);

        let step = machine.apply(CallEvent::Pickup);
        assert_eq!(step.description(), "Ring state");
    }

    #[test]
    fn apply_all_returns_final_state() {
        let mut machine = CallMachine::new();
        let state = machine.apply_all([CallEvent::IncomingCall, CallEvent::Pickup]);
        assert_eq!(state, CallState::Connected);
    }

    #[test]
    fn observer_sees_only_rejections() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut machine = CallMachine::builder()
            .on_reject(move |r: &InvalidTransition| sink.lock().unwrap().push(*r))
            .build()
            .unwrap();

        machine.apply_all([
            CallEvent::Timeout,
            CallEvent::OffHook,
            CallEvent::InvalidDigits,
            CallEvent::IncomingCall,
            CallEvent::Pickup,
            CallEvent::OnHook,
        ]);

        let seen = seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            &[InvalidTransition {
                state: CallState::Dial,
                event: CallEvent::InvalidDigits,
            }]
        );
    }

    #[test]
    fn history_records_every_step() {
        let mut machine = CallMachine::builder()
            .record_history(true)
            .build()
            .unwrap();
        machine.apply_all([CallEvent::OffHook, CallEvent::OnHook, CallEvent::Busy]);

        let history = machine.history().unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(
            history.get_path(),
            vec![&CallState::Idle, &CallState::Dial, &CallState::Idle, &CallState::Idle]
        );
        assert_eq!(history.last().unwrap().kind, StepKind::Ignored);
    }

    #[test]
    fn cloned_machines_diverge_independently() {
        let mut first = CallMachine::new();
        first.apply(CallEvent::OffHook);

        let mut second = first.clone();
        second.apply(CallEvent::Digits);

        assert_eq!(first.current_state(), CallState::Dial);
        assert_eq!(second.current_state(), CallState::Alerting);
    }
}
