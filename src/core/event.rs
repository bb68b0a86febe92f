//! Telephony events delivered to a line.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A discrete telephony indication.
///
/// Events carry no payload. Digit values and timeout durations belong to the
/// collaborator that produces the event.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum CallEvent {
    /// Handset placed back on hook
    OnHook,
    /// Handset lifted
    OffHook,
    /// Digits dialed
    Digits,
    /// Network reports the call is proceeding
    CallProceeding,
    /// Far end answered
    Connected,
    /// Network presents an incoming call
    IncomingCall,
    /// A timer owned by the driver expired
    Timeout,
    /// Dialed digits were rejected
    InvalidDigits,
    /// Far end is busy
    Busy,
    /// Incoming call answered locally
    Pickup,
}

impl CallEvent {
    /// Every event, in declaration order.
    pub const ALL: [CallEvent; 10] = [
        CallEvent::OnHook,
        CallEvent::OffHook,
        CallEvent::Digits,
        CallEvent::CallProceeding,
        CallEvent::Connected,
        CallEvent::IncomingCall,
        CallEvent::Timeout,
        CallEvent::InvalidDigits,
        CallEvent::Busy,
        CallEvent::Pickup,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::OnHook => "OnHook",
            Self::OffHook => "OffHook",
            Self::Digits => "Digits",
            Self::CallProceeding => "CallProceeding",
            Self::Connected => "Connected",
            Self::IncomingCall => "IncomingCall",
            Self::Timeout => "Timeout",
            Self::InvalidDigits => "InvalidDigits",
            Self::Busy => "Busy",
            Self::Pickup => "Pickup",
        }
    }
}

impl fmt::Display for CallEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
