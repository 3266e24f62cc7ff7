//! Test-tone streaming against a virtual controller

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dualhaptics_engine::prelude::*;
use dualhaptics_engine::{CounterSnapshot, PacerStats};
use serde::Serialize;
use tracing::{debug, info};

use crate::commands::ToneArgs;
use crate::error::CliError;
use crate::output;

const VIRTUAL_DEVICE_ID: &str = "virtual-0";
const MAX_SECONDS: f64 = 600.0;

/// Outcome of one tone run.
#[derive(Debug, Serialize)]
pub struct ToneReport {
    pub mode: ConnectionMode,
    pub frequency_hz: f32,
    pub seconds: f64,
    pub delivered: TickReport,
    pub bytes_written: usize,
    pub counters: CounterSnapshot,
    pub stop: Option<StopSummary>,
    pub pacer: PacerStats,
}

/// Execute tone command
pub fn execute(args: &ToneArgs, json: bool) -> Result<()> {
    validate_args(args)?;

    let config = match &args.config {
        Some(path) => HapticsConfig::load(path).map_err(CliError::from)?,
        None => HapticsConfig::default(),
    };

    let report = run_tone(args, config)?;
    output::print_tone_report(&report, json)
}

fn validate_args(args: &ToneArgs) -> Result<(), CliError> {
    if !args.frequency.is_finite() || args.frequency <= 0.0 {
        return Err(CliError::InvalidConfiguration(format!(
            "frequency must be positive, got {}",
            args.frequency
        )));
    }
    if !(0.0..=1.0).contains(&args.amplitude) {
        return Err(CliError::InvalidConfiguration(format!(
            "amplitude must be within [0, 1], got {}",
            args.amplitude
        )));
    }
    if !(args.seconds > 0.0 && args.seconds <= MAX_SECONDS) {
        return Err(CliError::InvalidConfiguration(format!(
            "seconds must be within (0, {MAX_SECONDS}], got {}",
            args.seconds
        )));
    }
    Ok(())
}

fn run_tone(args: &ToneArgs, config: HapticsConfig) -> Result<ToneReport, CliError> {
    let mode = ConnectionMode::from(args.mode);
    let device = Arc::new(VirtualDevice::new(VIRTUAL_DEVICE_ID, mode));
    device.set_recording(false);
    let id = DeviceId::from(VIRTUAL_DEVICE_ID);
    let source = ToneSource::new(args.frequency)
        .with_amplitude(args.amplitude)
        .with_duration(Duration::from_secs_f64(args.seconds))
        .paced(true);

    let mut pacer = TickPacer::new(config.tick_interval());
    let mut manager = HapticsManager::new(config);
    manager.start(device.clone(), Box::new(source))?;
    info!(%mode, frequency = args.frequency, seconds = args.seconds, "Streaming test tone");

    let mut delivered = TickReport::default();
    let mut counters = CounterSnapshot::default();
    let stop = loop {
        pacer.wait_for_tick();

        let Some(session) = manager.session(&id) else {
            break None;
        };
        counters = session.counters();
        if session.has_ended() {
            break manager.stop(&id);
        }
        delivered += manager.deliver();
    };

    debug!(?delivered, "Tone run finished");
    Ok(ToneReport {
        mode,
        frequency_hz: args.frequency,
        seconds: args.seconds,
        delivered,
        bytes_written: device.bytes_written(),
        counters,
        stop,
        pacer: pacer.stats(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ModeArg;

    fn args(mode: ModeArg, seconds: f64) -> ToneArgs {
        ToneArgs {
            mode,
            frequency: 160.0,
            amplitude: 0.5,
            seconds,
            config: None,
        }
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(validate_args(&args(ModeArg::Usb, 0.0)).is_err());
        assert!(validate_args(&args(ModeArg::Usb, 1e6)).is_err());

        let mut loud = args(ModeArg::Bt, 1.0);
        loud.amplitude = 2.0;
        assert!(validate_args(&loud).is_err());

        let mut silent = args(ModeArg::Bt, 1.0);
        silent.frequency = f32::NAN;
        assert!(validate_args(&silent).is_err());
    }

    #[test]
    fn bluetooth_run_delivers_packets() -> Result<(), CliError> {
        let report = run_tone(&args(ModeArg::Bt, 0.2), HapticsConfig::default())?;
        assert_eq!(report.mode, ConnectionMode::Bluetooth);
        assert!(report.counters.packets_produced >= 2);
        assert!(report.delivered.packets_written > 0);
        assert!(report.stop.is_some());
        Ok(())
    }
}
