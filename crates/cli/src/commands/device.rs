//! Device discovery commands

use anyhow::Result;
use dualhaptics_engine::select_platform_policy;

use crate::commands::DeviceCommands;
use crate::output::{self, DeviceSummary};

/// Execute device command
pub fn execute(cmd: &DeviceCommands, json: bool) -> Result<()> {
    match cmd {
        DeviceCommands::List { detailed } => list_devices(json, *detailed),
    }
}

fn list_devices(json: bool, detailed: bool) -> Result<()> {
    let policy = select_platform_policy();
    let devices: Vec<DeviceSummary> = policy.detect().iter().map(DeviceSummary::from).collect();
    output::print_device_list(&devices, policy.name(), json, detailed);
    Ok(())
}
