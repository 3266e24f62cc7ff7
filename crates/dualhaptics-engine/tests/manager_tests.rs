//! Multi-controller management and hot-plug handling.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{EndlessSilence, ScriptedSource};
use crossbeam::channel::unbounded;
use dualhaptics_engine::prelude::*;
use dualhaptics_test_helpers::prelude::*;

const WAIT: Duration = Duration::from_secs(5);

#[test]
fn connect_registers_idle_session() {
    let mut manager = HapticsManager::new(HapticsConfig::default());
    let device = Arc::new(VirtualDevice::new("pad-1", ConnectionMode::Usb));

    assert!(manager.connect(device.clone()).is_none());
    assert!(manager.connect(device).is_none());

    let session = must_some(manager.session(&DeviceId::from("pad-1")), "session");
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(manager.len(), 1);
}

#[test]
fn mode_change_replaces_session() -> TestResult {
    let mut manager = HapticsManager::new(HapticsConfig::default());
    let usb = Arc::new(VirtualDevice::new("pad", ConnectionMode::Usb));
    manager.start(usb, Box::new(EndlessSilence))?;

    let bt = Arc::new(VirtualDevice::new("pad", ConnectionMode::Bluetooth));
    let replaced = must_some(manager.connect(bt), "old session summary");
    assert_eq!(replaced.reason, StopReason::Requested);

    let session = must_some(manager.session(&DeviceId::from("pad")), "session");
    assert_eq!(session.mode(), ConnectionMode::Bluetooth);
    assert_eq!(session.state(), SessionState::Idle);
    Ok(())
}

#[test]
fn start_registered_requires_known_device() {
    let mut manager = HapticsManager::new(HapticsConfig::default());
    let result = manager.start_registered(&DeviceId::from("nope"), Box::new(EndlessSilence));
    assert!(matches!(
        result,
        Err(HapticsError::Device(DeviceError::NotConnected(_)))
    ));
}

#[test]
fn failed_start_keeps_device_registered() {
    let mut manager = HapticsManager::new(HapticsConfig::default());
    let device = Arc::new(VirtualDevice::disconnected("pad", ConnectionMode::Usb));

    assert!(manager.start(device, Box::new(EndlessSilence)).is_err());
    let session = must_some(manager.session(&DeviceId::from("pad")), "session");
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn tick_delivers_and_reaps_finished_sessions() -> TestResult {
    let mut manager = HapticsManager::new(HapticsConfig::default());
    let device = Arc::new(VirtualDevice::new("usb", ConnectionMode::Usb));
    let (source, gate) = ScriptedSource::blocks([silence_interleaved(256)]).gated();
    manager.start(device.clone(), Box::new(source))?;

    let id = DeviceId::from("usb");
    must_wait_until(WAIT, "pairs queued", || {
        manager.session(&id).is_some_and(|s| s.queued_items() == 256)
    });

    let report = manager.tick();
    assert_eq!(report.samples_written, 256);
    assert_eq!(device.write_count(), 1);

    drop(gate);
    must_wait_until(WAIT, "end of stream", || {
        manager.session(&id).is_some_and(HapticsSession::has_ended)
    });

    manager.tick();
    assert!(manager.session(&id).is_none());
    assert!(manager.is_empty());
    Ok(())
}

#[test]
fn deliver_leaves_finished_sessions_in_place() -> TestResult {
    let mut manager = HapticsManager::new(HapticsConfig::default());
    let device = Arc::new(VirtualDevice::new("usb", ConnectionMode::Usb));
    manager.start(device, Box::new(ScriptedSource::blocks([])))?;

    let id = DeviceId::from("usb");
    must_wait_until(WAIT, "end of stream", || {
        manager.session(&id).is_some_and(HapticsSession::has_ended)
    });

    let report = manager.deliver();
    assert_eq!(report.sessions_serviced, 0);
    assert!(manager.session(&id).is_some());

    let summary = must_some(manager.stop(&id), "summary");
    assert_eq!(summary.reason, StopReason::EndOfStream);
    Ok(())
}

#[test]
fn restart_after_end_of_stream_recreates_session() -> TestResult {
    let mut manager = HapticsManager::new(HapticsConfig::default());
    let device = Arc::new(VirtualDevice::new("bt", ConnectionMode::Bluetooth));
    let id = DeviceId::from("bt");

    manager.start(device, Box::new(ScriptedSource::blocks([])))?;
    must_wait_until(WAIT, "end of stream", || {
        manager.session(&id).is_some_and(HapticsSession::has_ended)
    });

    manager.start_registered(&id, Box::new(EndlessSilence))?;
    let session = must_some(manager.session(&id), "session");
    assert!(session.is_active());
    assert_eq!(session.counters().items_discarded, 0);

    assert!(manager.stop(&id).is_some());
    assert!(manager.stop(&id).is_none());
    Ok(())
}

#[test]
fn device_events_drive_registration() -> TestResult {
    let (tx, rx) = unbounded();
    let mut manager = HapticsManager::new(HapticsConfig::default()).with_events(rx);

    let a = Arc::new(VirtualDevice::new("a", ConnectionMode::Usb));
    let b = Arc::new(VirtualDevice::new("b", ConnectionMode::Bluetooth));
    tx.send(DeviceEvent::Connected(a))?;
    tx.send(DeviceEvent::Connected(b))?;
    assert_eq!(manager.pump_events(), 2);
    assert_eq!(manager.len(), 2);

    manager.start_registered(&DeviceId::from("b"), Box::new(EndlessSilence))?;
    tx.send(DeviceEvent::Disconnected(DeviceId::from("b")))?;
    manager.tick();

    assert_eq!(manager.len(), 1);
    assert!(manager.session(&DeviceId::from("b")).is_none());

    drop(tx);
    assert_eq!(manager.pump_events(), 0);
    Ok(())
}

#[test]
fn stop_all_stops_every_session() -> TestResult {
    let mut manager = HapticsManager::new(HapticsConfig::default());
    for id in ["x", "y", "z"] {
        let device = Arc::new(VirtualDevice::new(id, ConnectionMode::Bluetooth));
        manager.start(device, Box::new(EndlessSilence))?;
    }

    let stopped = manager.stop_all();
    let ids: Vec<&str> = stopped.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, ["x", "y", "z"]);
    assert!(manager.is_empty());
    Ok(())
}
