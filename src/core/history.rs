//! State transition history tracking.
//!
//! History is opt-in on a machine: a line fed forever would otherwise grow
//! its record without bound.

use super::event::CallEvent;
use super::call::CallState;
use super::transition::StepKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single applied event.
///
/// # Example
///
/// ```rust
/// use linecall::core::{CallEvent, CallState, StateTransition, StepKind};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: CallState::Idle,
///     to: CallState::Dial,
///     event: CallEvent::OffHook,
///     kind: StepKind::Handled,
///     timestamp: Utc::now(),
/// };
/// assert!(transition.changed_state());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state the event was evaluated in
    pub from: CallState,
    /// The state the event resolved to
    pub to: CallState,
    /// The event that was applied
    pub event: CallEvent,
    /// How the state resolved the event
    pub kind: StepKind,
    /// When the event was applied
    pub timestamp: DateTime<Utc>,
}

impl StateTransition {
    pub fn changed_state(&self) -> bool {
        self.from != self.to
    }
}

/// Ordered history of applied events.
///
/// # Example
///
/// ```rust
/// use linecall::core::{CallEvent, CallState, StateHistory, StateTransition, StepKind};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: CallState::Idle,
///         to: CallState::Ringing,
///         event: CallEvent::IncomingCall,
///         kind: StepKind::Handled,
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: CallState::Ringing,
///         to: CallState::Connected,
///         event: CallEvent::Pickup,
///         kind: StepKind::Handled,
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&CallState::Idle, &CallState::Ringing, &CallState::Connected]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning the extended history.
    pub fn record(mut self, transition: StateTransition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the first `from` state, then
    /// the `to` state of each transition. Self-loops appear as repeats.
    pub fn get_path(&self) -> Vec<&CallState> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Transitions taken through a state's invalid-input branch.
    pub fn rejections(&self) -> impl Iterator<Item = &StateTransition> {
        self.transitions
            .iter()
            .filter(|t| t.kind == StepKind::Rejected)
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Get all transitions in order.
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }
}
