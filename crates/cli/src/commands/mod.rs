//! Command implementations for hapticsctl

pub mod config;
pub mod device;
pub mod tone;

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use dualhaptics_hid_sony_protocol::ConnectionMode;

#[derive(Subcommand, Debug)]
pub enum DeviceCommands {
    /// List Sony controllers visible to this machine
    List {
        /// Show vendor/product ids and device paths
        #[arg(short, long)]
        detailed: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate a YAML or JSON configuration file
    Check {
        /// Configuration file path
        path: PathBuf,
    },

    /// Print the default configuration
    Show,
}

/// Transport to emulate.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Wired: 16-bit pairs at 48 kHz
    Usb,
    /// Wireless: 8-bit packets at 3 kHz
    #[value(alias = "bluetooth")]
    Bt,
}

impl From<ModeArg> for ConnectionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Usb => ConnectionMode::Usb,
            ModeArg::Bt => ConnectionMode::Bluetooth,
        }
    }
}

#[derive(Args, Debug)]
pub struct ToneArgs {
    /// Transport of the virtual controller
    #[arg(short, long, value_enum, default_value_t = ModeArg::Bt)]
    pub mode: ModeArg,

    /// Tone frequency in Hz
    #[arg(short, long, default_value_t = 160.0)]
    pub frequency: f32,

    /// Tone amplitude in [0, 1]
    #[arg(short, long, default_value_t = 0.8)]
    pub amplitude: f32,

    /// Stream length in seconds
    #[arg(short, long, default_value_t = 1.0)]
    pub seconds: f64,

    /// Configuration file to apply
    #[arg(short, long, env = "HAPTICSCTL_CONFIG")]
    pub config: Option<PathBuf>,
}
