//! Controller connection and write-path error types.

use crate::common::ErrorSeverity;

/// Device and transport errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    /// Device is known but not connected
    #[error("Device not connected: {0}")]
    NotConnected(String),

    /// Device went away while a session was using it
    #[error("Device disconnected: {0}")]
    Disconnected(String),

    /// A haptics write was rejected by the transport
    #[error("Write to device {device} failed: {message}")]
    WriteFailed {
        /// Device identifier
        device: String,
        /// Transport error message
        message: String,
    },

    /// Vendor/product pair is not a supported controller
    #[error("Unsupported device: vendor={vendor_id:#06x}, product={product_id:#06x}")]
    UnsupportedDevice {
        /// USB vendor ID
        vendor_id: u16,
        /// USB product ID
        product_id: u16,
    },

    /// Device already has a live session
    #[error("Device {0} is busy")]
    Busy(String),

    /// Platform I/O error while talking to the device node
    #[error("I/O error on device {device}: {message}")]
    Io {
        /// Device identifier or path
        device: String,
        /// Error message
        message: String,
    },
}

impl DeviceError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DeviceError::NotConnected(_) => ErrorSeverity::Error,
            DeviceError::Disconnected(_) => ErrorSeverity::Critical,
            DeviceError::WriteFailed { .. } => ErrorSeverity::Warning,
            DeviceError::UnsupportedDevice { .. } => ErrorSeverity::Error,
            DeviceError::Busy(_) => ErrorSeverity::Warning,
            DeviceError::Io { .. } => ErrorSeverity::Error,
        }
    }

    /// Check if this error indicates the device is unavailable.
    pub fn is_device_unavailable(&self) -> bool {
        matches!(
            self,
            DeviceError::NotConnected(_) | DeviceError::Disconnected(_)
        )
    }

    /// Create a not connected error.
    pub fn not_connected(device: impl Into<String>) -> Self {
        DeviceError::NotConnected(device.into())
    }

    /// Create a disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        DeviceError::Disconnected(device.into())
    }

    /// Create a write failed error.
    pub fn write_failed(device: impl Into<String>, message: impl Into<String>) -> Self {
        DeviceError::WriteFailed {
            device: device.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported device error.
    pub fn unsupported(vendor_id: u16, product_id: u16) -> Self {
        DeviceError::UnsupportedDevice {
            vendor_id,
            product_id,
        }
    }

    /// Create a busy error.
    pub fn busy(device: impl Into<String>) -> Self {
        DeviceError::Busy(device.into())
    }

    /// Create an I/O error from a `std::io::Error`.
    pub fn io(device: impl Into<String>, err: &std::io::Error) -> Self {
        DeviceError::Io {
            device: device.into(),
            message: err.to_string(),
        }
    }
}
