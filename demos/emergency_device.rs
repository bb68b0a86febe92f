//! Emergency Device
//!
//! A single line fed the same indication over and over, the way a bare call
//! processing task would drive one device.
//!
//! Key concepts:
//! - The driver owns the machine; there is no global device
//! - Every apply logs the state being evaluated
//! - Invalid input is reported to an observer and the line resets to Idle
//!
//! Run with: cargo run --example emergency_device -- [iterations]
//! Set RUST_LOG=debug to also see each transition.

use linecall::{CallEvent, CallMachine, InvalidTransition};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_ITERATIONS: usize = 10;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let iterations = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_ITERATIONS);

    println!("=== Emergency device called ===\n");

    let rejected = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&rejected);

    let mut device = match CallMachine::builder()
        .line("emergency")
        .on_reject(move |r: &InvalidTransition| {
            counter.fetch_add(1, Ordering::Relaxed);
            println!("  [reject] {r}");
        })
        .build()
    {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("failed to build device: {e}");
            std::process::exit(1);
        }
    };

    for _ in 0..iterations {
        device.apply(CallEvent::IncomingCall);
    }

    println!("\nApplied {iterations} events");
    println!("Rejected {} of them", rejected.load(Ordering::Relaxed));
    println!("Final state: {}", device.current_state());

    println!("\n=== Example Complete ===");
}
