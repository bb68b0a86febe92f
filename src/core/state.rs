//! Core State trait for call-control states.
//!
//! States are plain values; every method here is pure and exists so that
//! history, checkpoints and logging can treat any state type uniformly.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: states are copied into history records and checkpoints
/// - `PartialEq`: states must be comparable for transition logic
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states must be serializable for persistence
///
/// # Example
///
/// ```rust
/// use linecall::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum HookState {
///     OnHook,
///     OffHook,
/// }
///
/// impl State for HookState {
///     fn name(&self) -> &str {
///         match self {
///             Self::OnHook => "OnHook",
///             Self::OffHook => "OffHook",
///         }
///     }
/// }
///
/// assert_eq!(HookState::OffHook.description(), "OffHook state");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Human-readable line emitted when the machine evaluates this state.
    ///
    /// Default implementation appends " state" to [`State::name`].
    fn description(&self) -> String {
        format!("{} state", self.name())
    }
}
