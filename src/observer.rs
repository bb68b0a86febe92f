//! Reject side-channel.
//!
//! When Dial, Alerting or Ringing receive an event they do not handle, the
//! machine resets to Idle and reports an [`InvalidTransition`] to the
//! installed observer. Idle, Busy and Connected never report: their catch-all
//! branches are intentional.

use crate::core::{CallEvent, CallState, Step};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Non-fatal signal raised for an abnormal reset to Idle.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct InvalidTransition {
    pub state: CallState,
    pub event: CallEvent,
}

impl InvalidTransition {
    /// Build the signal for a rejected step; `None` for anything else.
    pub fn from_step(step: &Step) -> Option<Self> {
        step.is_rejected().then_some(Self {
            state: step.from,
            event: step.event,
        })
    }
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid input {} in {} state, line reset to Idle",
            self.event, self.state
        )
    }
}

/// Receiver for invalid-input notifications.
///
/// Observers run synchronously inside `apply` and must not block.
pub trait RejectObserver: Send + Sync {
    fn on_reject(&self, rejection: &InvalidTransition);
}

impl<F> RejectObserver for F
where
    F: Fn(&InvalidTransition) + Send + Sync,
{
    fn on_reject(&self, rejection: &InvalidTransition) {
        self(rejection)
    }
}

/// Shared handle to an observer, cloneable across machines.
pub type SharedObserver = Arc<dyn RejectObserver>;
