//! End-to-end call scenarios driven through the public API.

use linecall::{
    CallEvent, CallMachine, CallMachineBuilder, CallState, InvalidTransition, LineRegistry,
    MachineConfig, StepKind,
};
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_captured_log<F: FnOnce()>(f: F) -> String {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    log.contents()
}

#[test]
fn outgoing_call_happy_path() {
    let mut machine = CallMachine::new();

    assert_eq!(machine.apply(CallEvent::OffHook).to, CallState::Dial);
    assert_eq!(machine.apply(CallEvent::Digits).to, CallState::Alerting);
    assert_eq!(machine.apply(CallEvent::Connected).to, CallState::Connected);
    assert_eq!(machine.apply(CallEvent::CallProceeding).to, CallState::Idle);

    assert_eq!(machine.current_state(), CallState::Idle);
}

#[test]
fn incoming_call_flow() {
    let mut machine = CallMachine::new();

    assert_eq!(machine.apply(CallEvent::IncomingCall).to, CallState::Ringing);
    assert_eq!(machine.apply(CallEvent::Pickup).to, CallState::Connected);
    assert_eq!(machine.apply(CallEvent::OnHook).to, CallState::Idle);
}

#[test]
fn hang_up_while_dialing() {
    let mut machine = CallMachine::new();
    machine.apply(CallEvent::OffHook);

    let step = machine.apply(CallEvent::OnHook);
    assert_eq!(step.to, CallState::Idle);
    assert_eq!(step.kind, StepKind::Handled);
}

#[test]
fn abnormal_event_while_dialing_resets_and_reports() {
    let rejections = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&rejections);
    let mut machine = CallMachine::builder()
        .on_reject(move |r: &InvalidTransition| sink.lock().unwrap().push(*r))
        .build()
        .unwrap();

    machine.apply(CallEvent::OffHook);
    let step = machine.apply(CallEvent::Busy);

    assert_eq!(step.to, CallState::Idle);
    assert_eq!(step.kind, StepKind::Rejected);
    assert_eq!(
        rejections.lock().unwrap().as_slice(),
        &[InvalidTransition {
            state: CallState::Dial,
            event: CallEvent::Busy,
        }]
    );
}

#[test]
fn intentional_resets_are_not_reported() {
    let count = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&count);
    let mut machine = CallMachine::builder()
        .on_reject(move |_: &InvalidTransition| *counter.lock().unwrap() += 1)
        .build()
        .unwrap();

    // Idle ignores, Connected releases: neither is invalid input.
    machine.apply_all([
        CallEvent::Timeout,
        CallEvent::IncomingCall,
        CallEvent::Pickup,
        CallEvent::Busy,
    ]);

    assert_eq!(machine.current_state(), CallState::Idle);
    assert_eq!(*count.lock().unwrap(), 0);
}

#[test]
fn every_pair_resolves_to_a_declared_state() {
    for state in CallState::ALL {
        for event in CallEvent::ALL {
            let step = linecall::core::transition(state, event);
            assert!(CallState::ALL.contains(&step.to));
        }
    }
}

#[test]
fn each_apply_logs_the_evaluated_state() {
    let output = with_captured_log(|| {
        let mut machine = CallMachine::builder().line("emergency").build().unwrap();
        machine.apply_all([CallEvent::IncomingCall, CallEvent::IncomingCall]);
    });

    assert!(output.contains("Idle state"));
    assert!(output.contains("Ring state"));
    assert!(output.contains("line=emergency"));
    assert!(output.contains("invalid input"));
}

#[test]
fn silent_machine_skips_descriptions() {
    let output = with_captured_log(|| {
        let config = MachineConfig::from_json(r#"{ "line": "quiet", "silent": true }"#).unwrap();
        let mut machine = CallMachineBuilder::from_config(config).build().unwrap();
        machine.apply(CallEvent::OffHook);
    });

    assert!(!output.contains("Idle state"));
}

#[test]
fn registry_lines_run_independent_calls() {
    let mut registry = LineRegistry::new();
    let caller = registry.provision().unwrap();
    let callee = registry.provision().unwrap();

    for event in [CallEvent::OffHook, CallEvent::Digits] {
        registry.dispatch(caller, event).unwrap();
    }
    registry.dispatch(callee, CallEvent::IncomingCall).unwrap();
    registry.dispatch(callee, CallEvent::Pickup).unwrap();
    registry.dispatch(caller, CallEvent::Connected).unwrap();

    assert_eq!(registry.state(caller).unwrap(), CallState::Connected);
    assert_eq!(registry.state(callee).unwrap(), CallState::Connected);

    registry.dispatch(caller, CallEvent::OnHook).unwrap();
    assert_eq!(registry.state(caller).unwrap(), CallState::Idle);
    assert_eq!(registry.state(callee).unwrap(), CallState::Connected);
}

#[test]
fn repeated_incoming_calls_are_counted_without_history() {
    let count = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&count);
    let mut device = CallMachine::builder()
        .line("emergency")
        .on_reject(move |_: &InvalidTransition| *counter.lock().unwrap() += 1)
        .build()
        .unwrap();

    for _ in 0..10 {
        device.apply(CallEvent::IncomingCall);
    }

    // Idle rings, Ringing rejects the repeat and drops back to Idle.
    assert_eq!(*count.lock().unwrap(), 5);
    assert_eq!(device.current_state(), CallState::Idle);
    assert!(device.history().is_none());
}
