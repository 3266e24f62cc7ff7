//! Output formatting for CLI responses

use std::path::Path;

use anyhow::{Error, Result};
use colored::*;
use dualhaptics_engine::{DeviceContext, HapticsConfig};
use dualhaptics_hid_sony_protocol::{ConnectionMode, DeviceModel};
use serde::Serialize;
use serde_json::json;

use crate::commands::tone::ToneReport;

/// Discovered controller, as printed by `device list`.
#[derive(Debug, Serialize)]
pub struct DeviceSummary {
    pub path: String,
    pub name: String,
    pub model: DeviceModel,
    pub mode: ConnectionMode,
    pub vendor_id: u16,
    pub product_id: u16,
}

impl From<&DeviceContext> for DeviceSummary {
    fn from(ctx: &DeviceContext) -> Self {
        Self {
            path: ctx.path.display().to_string(),
            name: ctx.name.clone(),
            model: ctx.model,
            mode: ctx.mode,
            vendor_id: ctx.vendor_id,
            product_id: ctx.product_id,
        }
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print device list in specified format
pub fn print_device_list(devices: &[DeviceSummary], policy: &str, json: bool, detailed: bool) {
    if json {
        let output = json!({
            "success": true,
            "policy": policy,
            "devices": devices,
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format device list as JSON: {e}"),
        }
        return;
    }

    if devices.is_empty() {
        println!("{} (policy: {policy})", "No controllers found".yellow());
        return;
    }

    println!("{}", "Connected Controllers:".bold());
    for device in devices {
        println!(
            "  {} {} ({}, {})",
            "●".green(),
            device.model.name().bold(),
            device.mode,
            device.path.dimmed()
        );
        if detailed {
            println!("    Name:    {}", device.name);
            println!(
                "    IDs:     {:04X}:{:04X}",
                device.vendor_id, device.product_id
            );
        }
    }
}

/// Print a configuration.
pub fn print_config(config: &HapticsConfig, json: bool) -> Result<()> {
    if json {
        return print_json(&json!({ "success": true, "config": config }));
    }
    print!("{}", serde_yaml::to_string(config)?);
    Ok(())
}

/// Print the result of validating a configuration file.
pub fn print_config_valid(path: &Path, config: &HapticsConfig, json: bool) -> Result<()> {
    if json {
        return print_json(&json!({
            "success": true,
            "path": path.display().to_string(),
            "config": config,
        }));
    }

    println!("{} {}", "✓".green(), path.display());
    println!("  USB filter alpha:          {}", config.usb_filter.alpha);
    println!("  Bluetooth filter alpha:    {}", config.bluetooth_filter.alpha);
    println!(
        "  Resampled filter alpha:    {}",
        config.bluetooth_resampled_filter.alpha
    );
    println!("  Read block:                {} frames", config.read_block_frames);
    println!("  Tick interval:             {} ms", config.tick_interval_ms);
    Ok(())
}

/// Print a tone run report.
pub fn print_tone_report(report: &ToneReport, json: bool) -> Result<()> {
    if json {
        return print_json(&json!({ "success": true, "report": report }));
    }

    println!(
        "{} {} Hz for {:.2} s over {}",
        "Tone:".bold(),
        report.frequency_hz,
        report.seconds,
        report.mode
    );
    println!("  Blocks received:   {}", report.counters.blocks_received);
    match report.mode {
        ConnectionMode::Bluetooth => {
            println!("  Resample cycles:   {}", report.counters.resample_cycles);
            println!("  Packets produced:  {}", report.counters.packets_produced);
            println!("  Packets written:   {}", report.delivered.packets_written);
        }
        ConnectionMode::Usb => {
            println!("  Pairs produced:    {}", report.counters.samples_produced);
            println!("  Pairs written:     {}", report.delivered.samples_written);
        }
    }
    println!("  Bytes written:     {}", report.bytes_written);

    let errors = report.delivered.write_errors;
    let label = format!("  Write errors:      {errors}");
    if errors == 0 {
        println!("{label}");
    } else {
        println!("{}", label.red());
    }

    if let Some(stop) = &report.stop {
        println!("  Stopped:           {:?} ({} discarded)", stop.reason, stop.discarded);
    }
    println!(
        "  Ticks:             {} ({} late, worst {} us)",
        report.pacer.ticks, report.pacer.missed_deadlines, report.pacer.max_lateness_us
    );
    Ok(())
}
