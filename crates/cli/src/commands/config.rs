//! Configuration commands

use anyhow::Result;
use dualhaptics_engine::HapticsConfig;

use crate::commands::ConfigCommands;
use crate::error::CliError;
use crate::output;

/// Execute config command
pub fn execute(cmd: &ConfigCommands, json: bool) -> Result<()> {
    match cmd {
        ConfigCommands::Check { path } => {
            let config = HapticsConfig::load(path).map_err(CliError::from)?;
            output::print_config_valid(path, &config, json)
        }
        ConfigCommands::Show => output::print_config(&HapticsConfig::default(), json),
    }
}
