//! Configuration and builder API for call machines.
//!
//! Settings live in a serde-loadable [`MachineConfig`]; the fluent
//! [`CallMachineBuilder`] adds the parts that cannot be serialized, such as
//! the reject observer.

pub mod config;
pub mod error;
pub mod machine;

pub use config::MachineConfig;
pub use error::BuildError;
pub use machine::CallMachineBuilder;
