//! Session start, stop and mid-stream termination.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{EndlessSilence, ScriptedSource, Step};
use dualhaptics_engine::prelude::*;
use dualhaptics_test_helpers::prelude::*;

const WAIT: Duration = Duration::from_secs(5);

fn bt_device(id: &str) -> Arc<VirtualDevice> {
    Arc::new(VirtualDevice::new(id, ConnectionMode::Bluetooth))
}

#[test]
fn start_on_disconnected_device_stays_idle() {
    let device = Arc::new(VirtualDevice::disconnected("gone", ConnectionMode::Usb));
    let mut session = HapticsSession::new(device, HapticsConfig::default());

    let result = session.start(Box::new(EndlessSilence), &AudioEndpointRegistry::new());

    assert!(matches!(
        result,
        Err(HapticsError::Device(DeviceError::NotConnected(_)))
    ));
    assert_eq!(session.state(), SessionState::Idle);
    assert!(!session.has_ended());
    assert_eq!(session.counters().blocks_received, 0);
}

#[test]
fn failed_open_stays_idle_and_releases_endpoint() {
    let registry = AudioEndpointRegistry::new();
    let mut session = HapticsSession::new(bt_device("pad"), HapticsConfig::default());

    let source = ScriptedSource::failing_open().with_endpoint("hw:1,0");
    let result = session.start(Box::new(source), &registry);

    assert!(matches!(
        result,
        Err(HapticsError::Source(SourceError::Unavailable(_)))
    ));
    assert_eq!(session.state(), SessionState::Idle);
    assert!(!registry.is_in_use("hw:1,0"));
}

#[test]
fn out_of_range_config_rejected_at_start() {
    let config = HapticsConfig {
        accumulator_reserve_blocks: usize::MAX,
        ..HapticsConfig::default()
    };
    let mut session = HapticsSession::new(bt_device("pad"), config);

    let result = session.start(Box::new(EndlessSilence), &AudioEndpointRegistry::new());

    assert!(matches!(
        result,
        Err(HapticsError::Validation(ValidationError::OutOfRange { .. }))
    ));
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn stop_joins_producer_and_discards_queue() -> TestResult {
    let mut session = HapticsSession::new(bt_device("pad"), HapticsConfig::default());
    let signal = sine_interleaved(200.0, 0.5, 2048);
    let blocks = signal.chunks(2048).map(<[f32]>::to_vec);
    let (source, gate) = ScriptedSource::blocks(blocks).gated();
    session.start(Box::new(source), &AudioEndpointRegistry::new())?;

    must_wait_until(WAIT, "4 packets queued", || session.queued_items() == 4);
    assert_eq!(session.state(), SessionState::Streaming);

    drop(gate);
    let summary = session.stop();

    assert_eq!(summary.discarded, 4);
    assert_eq!(session.queued_items(), 0);
    assert_eq!(session.state(), SessionState::Stopped);
    assert_eq!(session.counters().items_discarded, 4);
    assert!(!session.has_ended());
    Ok(())
}

#[test]
fn explicit_stop_of_endless_source_reports_requested() -> TestResult {
    let mut session = HapticsSession::new(bt_device("pad"), HapticsConfig::default());
    session.start(Box::new(EndlessSilence), &AudioEndpointRegistry::new())?;
    must_wait_until(WAIT, "streaming", || session.state() == SessionState::Streaming);

    let summary = session.stop();
    assert_eq!(summary.reason, StopReason::Requested);
    assert_eq!(session.state(), SessionState::Stopped);

    let again = session.stop();
    assert_eq!(again.discarded, 0);
    Ok(())
}

#[test]
fn second_start_is_rejected() -> TestResult {
    let mut session = HapticsSession::new(bt_device("pad"), HapticsConfig::default());
    session.start(Box::new(EndlessSilence), &AudioEndpointRegistry::new())?;

    let result = session.start(Box::new(EndlessSilence), &AudioEndpointRegistry::new());
    assert!(matches!(result, Err(HapticsError::InvalidState { .. })));

    session.stop();
    let result = session.start(Box::new(EndlessSilence), &AudioEndpointRegistry::new());
    assert!(matches!(result, Err(HapticsError::InvalidState { .. })));
    Ok(())
}

#[test]
fn end_of_stream_moves_to_stopping() -> TestResult {
    let mut session = HapticsSession::new(bt_device("pad"), HapticsConfig::default());
    let source = ScriptedSource::blocks([silence_interleaved(1024)]);
    session.start(Box::new(source), &AudioEndpointRegistry::new())?;

    must_wait_until(WAIT, "producer to finish", || session.has_ended());
    assert_eq!(session.state(), SessionState::Stopping);
    assert!(!session.is_active());

    let summary = session.stop();
    assert_eq!(summary.reason, StopReason::EndOfStream);
    assert_eq!(summary.discarded, 2);
    Ok(())
}

#[test]
fn source_failure_ends_stream() -> TestResult {
    let mut session = HapticsSession::new(bt_device("pad"), HapticsConfig::default());
    let source = ScriptedSource::new([
        Step::Block(silence_interleaved(512)),
        Step::Fail("decoder lost sync".to_owned()),
    ]);
    session.start(Box::new(source), &AudioEndpointRegistry::new())?;

    must_wait_until(WAIT, "producer to finish", || session.has_ended());
    let summary = session.stop();
    assert_eq!(
        summary.reason,
        StopReason::SourceFailed("decoder lost sync".to_owned())
    );
    assert_eq!(summary.discarded, 0);
    Ok(())
}

#[test]
fn device_disconnect_ends_stream() -> TestResult {
    let device = bt_device("pad");
    let mut session = HapticsSession::new(device.clone(), HapticsConfig::default());
    session.start(Box::new(EndlessSilence), &AudioEndpointRegistry::new())?;
    must_wait_until(WAIT, "streaming", || session.state() == SessionState::Streaming);

    device.disconnect();
    must_wait_until(WAIT, "producer to notice", || session.has_ended());

    let summary = session.stop();
    assert_eq!(summary.reason, StopReason::DeviceDisconnected);
    Ok(())
}

#[test]
fn endpoint_is_exclusive_across_sessions() -> TestResult {
    let registry = AudioEndpointRegistry::new();
    let mut first = HapticsSession::new(bt_device("a"), HapticsConfig::default());
    let mut second = HapticsSession::new(bt_device("b"), HapticsConfig::default());

    let (source, gate) = ScriptedSource::blocks([]).with_endpoint("loopback").gated();
    first.start(Box::new(source), &registry)?;
    assert!(registry.is_in_use("loopback"));

    let busy = ScriptedSource::blocks([]).with_endpoint("loopback");
    let result = second.start(Box::new(busy), &registry);
    assert!(matches!(
        result,
        Err(HapticsError::Source(SourceError::EndpointBusy(ref endpoint))) if endpoint == "loopback"
    ));
    assert_eq!(second.state(), SessionState::Idle);

    drop(gate);
    first.stop();
    assert!(!registry.is_in_use("loopback"));

    let free = ScriptedSource::blocks([]).with_endpoint("loopback");
    second.start(Box::new(free), &registry)?;
    second.stop();
    Ok(())
}

#[test]
fn dropping_a_running_session_stops_it() -> TestResult {
    let registry = AudioEndpointRegistry::new();
    {
        let mut session = HapticsSession::new(bt_device("pad"), HapticsConfig::default());
        let source = ScriptedSource::new([]).with_endpoint("hw:0,0");
        let (source, gate) = source.gated();
        session.start(Box::new(source), &registry)?;
        drop(gate);
    }
    assert!(!registry.is_in_use("hw:0,0"));
    Ok(())
}
