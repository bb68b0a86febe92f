//! The six phases of a call on one line.

use super::event::CallEvent;
use super::state::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Call-control state of a line.
///
/// Serialized as its variant name, which is the only datum a checkpoint
/// needs to restore a machine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum CallState {
    /// On hook, no call
    #[default]
    Idle,
    /// Off hook, collecting digits
    Dial,
    /// Far end busy
    Busy,
    /// Far end being alerted
    Alerting,
    /// Call established
    Connected,
    /// Incoming call ringing locally
    Ringing,
}

impl CallState {
    /// Every state, in declaration order.
    pub const ALL: [CallState; 6] = [
        CallState::Idle,
        CallState::Dial,
        CallState::Busy,
        CallState::Alerting,
        CallState::Connected,
        CallState::Ringing,
    ];

    /// Events this state handles explicitly.
    ///
    /// Anything else falls through to the state's default branch. Busy and
    /// Connected have no expected events: every event releases them.
    pub fn expected_events(&self) -> &'static [CallEvent] {
        match self {
            Self::Idle => &[CallEvent::OffHook, CallEvent::IncomingCall],
            Self::Dial => &[CallEvent::Digits, CallEvent::OnHook],
            Self::Alerting => &[CallEvent::Connected],
            Self::Ringing => &[CallEvent::Pickup],
            Self::Busy | Self::Connected => &[],
        }
    }

    pub fn expects(&self, event: CallEvent) -> bool {
        self.expected_events().contains(&event)
    }
}

impl State for CallState {
    fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::Dial => "Dial",
            Self::Busy => "Busy",
            Self::Alerting => "Alerting",
            Self::Connected => "Connected",
            Self::Ringing => "Ringing",
        }
    }

    fn description(&self) -> String {
        let line = match self {
            Self::Idle => "Idle state",
            Self::Dial => "Dial state",
            Self::Busy => "Busy state",
            Self::Alerting => "Alert state",
            Self::Connected => "Connected state",
            Self::Ringing => "Ring state",
        };
        line.to_string()
    }
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
