//! Error types for hapticsctl

use dualhaptics_engine::HapticsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Haptics error: {0}")]
    Haptics(#[from] HapticsError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::DeviceNotFound(_) => 2,
            CliError::InvalidConfiguration(_) => 4,
            CliError::Haptics(e) if e.is_configuration_error() => 4,
            CliError::JsonError(_) | CliError::YamlError(_) => 4,
            CliError::Haptics(_) | CliError::IoError(_) => 1,
        }
    }
}
