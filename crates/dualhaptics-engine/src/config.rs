//! Haptics pipeline configuration.
//!
//! Loaded from YAML or JSON. Every field has a default, so an empty document
//! is a valid configuration. All filter coefficients default to `1.0`
//! (pass-through).

use std::path::Path;
use std::time::Duration;

use dualhaptics_dsp::SampleFilter;
use dualhaptics_errors::{HapticsError, ValidationError};
use dualhaptics_hid_sony_protocol::ConnectionMode;
use serde::{Deserialize, Serialize};

/// Coefficient for one [`SampleFilter`] stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Filter coefficient in `[0.0, 1.0]`; `1.0` passes input through
    pub alpha: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

impl FilterConfig {
    /// Build a fresh filter with zeroed state.
    pub fn build(&self) -> SampleFilter {
        SampleFilter::new(self.alpha)
    }
}

/// Largest accepted `read_block_frames`.
pub const MAX_READ_BLOCK_FRAMES: usize = 65_536;

/// Largest accepted `accumulator_reserve_blocks`.
pub const MAX_ACCUMULATOR_RESERVE_BLOCKS: usize = 64;

/// Configuration shared by all haptics sessions of a manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HapticsConfig {
    /// Filter applied to USB sessions at the source rate
    pub usb_filter: FilterConfig,
    /// Filter applied to Bluetooth sessions at the source rate
    pub bluetooth_filter: FilterConfig,
    /// Filter applied to Bluetooth sessions after resampling
    pub bluetooth_resampled_filter: FilterConfig,
    /// Stereo frames requested per source read
    pub read_block_frames: usize,
    /// Accumulator capacity reserved at start, in resample windows
    pub accumulator_reserve_blocks: usize,
    /// Delivery tick period in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self {
            usb_filter: FilterConfig::default(),
            bluetooth_filter: FilterConfig::default(),
            bluetooth_resampled_filter: FilterConfig::default(),
            read_block_frames: 1024,
            accumulator_reserve_blocks: 4,
            tick_interval_ms: 16,
        }
    }
}

impl HapticsConfig {
    /// Check every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, filter) in [
            ("usb_filter.alpha", &self.usb_filter),
            ("bluetooth_filter.alpha", &self.bluetooth_filter),
            ("bluetooth_resampled_filter.alpha", &self.bluetooth_resampled_filter),
        ] {
            if !(0.0..=1.0).contains(&filter.alpha) {
                return Err(ValidationError::out_of_range(field, filter.alpha, 0.0, 1.0));
            }
        }

        if !(1..=MAX_READ_BLOCK_FRAMES).contains(&self.read_block_frames) {
            return Err(ValidationError::out_of_range(
                "read_block_frames",
                self.read_block_frames,
                1,
                MAX_READ_BLOCK_FRAMES,
            ));
        }

        if !(1..=MAX_ACCUMULATOR_RESERVE_BLOCKS).contains(&self.accumulator_reserve_blocks) {
            return Err(ValidationError::out_of_range(
                "accumulator_reserve_blocks",
                self.accumulator_reserve_blocks,
                1,
                MAX_ACCUMULATOR_RESERVE_BLOCKS,
            ));
        }

        if !(1..=1000).contains(&self.tick_interval_ms) {
            return Err(ValidationError::out_of_range(
                "tick_interval_ms",
                self.tick_interval_ms,
                1,
                1000,
            ));
        }

        Ok(())
    }

    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error.
    pub fn from_yaml_str(text: &str) -> Result<Self, ValidationError> {
        let config: Self =
            serde_yaml::from_str(text).map_err(|e| ValidationError::parse("yaml", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error.
    pub fn from_json_str(text: &str) -> Result<Self, ValidationError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ValidationError::parse("json", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file. `.json` files are parsed as JSON, anything
    /// else as YAML.
    ///
    /// # Errors
    ///
    /// Returns an I/O, parse or validation error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HapticsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_yaml_str(&text)?
        };
        Ok(config)
    }

    /// Source-rate filter for a connection mode.
    pub fn source_filter(&self, mode: ConnectionMode) -> SampleFilter {
        match mode {
            ConnectionMode::Usb => self.usb_filter.build(),
            ConnectionMode::Bluetooth => self.bluetooth_filter.build(),
        }
    }

    /// Post-resample filter for Bluetooth sessions.
    pub fn resampled_filter(&self) -> SampleFilter {
        self.bluetooth_resampled_filter.build()
    }

    /// Delivery tick period.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
