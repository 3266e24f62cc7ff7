//! Transport detection.
//!
//! The connection mode selects the haptic wire format and is fixed for the
//! lifetime of a session.

use serde::{Deserialize, Serialize};

/// HID-over-Bluetooth service class GUID as it appears in Windows device paths.
pub const BT_HID_SERVICE_GUID: &str = "{00001124-0000-1000-8000-00805f9b34fb}";

/// Linux HID bus type for USB devices.
pub const HID_BUS_USB: u16 = 0x0003;

/// Linux HID bus type for Bluetooth devices.
pub const HID_BUS_BLUETOOTH: u16 = 0x0005;

/// How the controller is attached to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionMode {
    /// Wired USB
    Usb,
    /// Wireless Bluetooth
    Bluetooth,
}

impl ConnectionMode {
    /// Infer the transport from a platform device path.
    ///
    /// Paths containing the HID Bluetooth service GUID, `bth` or `BTHENUM`
    /// (case-insensitive) are Bluetooth; everything else is USB.
    ///
    /// # Examples
    /// ```
    /// use dualhaptics_hid_sony_protocol::ConnectionMode;
    /// let bt = r"\\?\HID#{00001124-0000-1000-8000-00805F9B34FB}_VID&0002054c_PID&0ce6";
    /// assert_eq!(ConnectionMode::from_device_path(bt), ConnectionMode::Bluetooth);
    /// assert_eq!(ConnectionMode::from_device_path("/dev/hidraw0"), ConnectionMode::Usb);
    /// ```
    pub fn from_device_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        if lower.contains(BT_HID_SERVICE_GUID) || lower.contains("bth") {
            ConnectionMode::Bluetooth
        } else {
            ConnectionMode::Usb
        }
    }

    /// Map a Linux HID bus type to a transport.
    pub fn from_hid_bus(bus: u16) -> Option<Self> {
        match bus {
            HID_BUS_USB => Some(ConnectionMode::Usb),
            HID_BUS_BLUETOOTH => Some(ConnectionMode::Bluetooth),
            _ => None,
        }
    }

    /// Short lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionMode::Usb => "usb",
            ConnectionMode::Bluetooth => "bluetooth",
        }
    }

    /// Whether this transport needs the 3 kHz resample path.
    pub fn is_bluetooth(self) -> bool {
        matches!(self, ConnectionMode::Bluetooth)
    }
}

impl std::fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bthenum_paths_are_bluetooth() {
        let path = r"\\?\BTHENUM#{00001124-0000-1000-8000-00805f9b34fb}_LOCALMFG&0002";
        assert_eq!(ConnectionMode::from_device_path(path), ConnectionMode::Bluetooth);
    }

    #[test]
    fn usb_paths_are_usb() {
        let path = r"\\?\HID#VID_054C&PID_0CE6&MI_03#7&1a2b3c4d&0&0000";
        assert_eq!(ConnectionMode::from_device_path(path), ConnectionMode::Usb);
    }

    #[test]
    fn hid_bus_mapping() {
        assert_eq!(ConnectionMode::from_hid_bus(0x0003), Some(ConnectionMode::Usb));
        assert_eq!(ConnectionMode::from_hid_bus(0x0005), Some(ConnectionMode::Bluetooth));
        assert_eq!(ConnectionMode::from_hid_bus(0x0018), None);
    }
}
