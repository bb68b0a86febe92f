//! Core call-control types and logic.
//!
//! This module contains the pure part of the crate:
//! - State and event vocabularies
//! - The total transition table
//! - History records
//!
//! Nothing in here logs or can fail.

mod call;
mod event;
mod history;
mod state;
mod transition;

pub use call::CallState;
pub use event::CallEvent;
pub use history::{StateHistory, StateTransition};
pub use state::State;
pub use transition::{transition, Step, StepKind};
