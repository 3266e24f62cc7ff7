//! HID report sizes per model and transport.

use crate::{ConnectionMode, DeviceModel};

/// Size of the Bluetooth output report carrying audio haptics.
pub const BT_AUDIO_HAPTIC_REPORT_LEN: usize = 142;

/// Input report length for a model on a transport.
///
/// The DualShock 4 streams its extended 547-byte report over Bluetooth.
pub fn input_report_len(model: DeviceModel, mode: ConnectionMode) -> usize {
    match (model, mode) {
        (_, ConnectionMode::Usb) => 64,
        (DeviceModel::DualShock4, ConnectionMode::Bluetooth) => 547,
        (_, ConnectionMode::Bluetooth) => 78,
    }
}

/// Output report length for a model on a transport.
pub fn output_report_len(model: DeviceModel, mode: ConnectionMode) -> usize {
    match (model, mode) {
        (_, ConnectionMode::Bluetooth) => 78,
        (DeviceModel::DualShock4, ConnectionMode::Usb) => 32,
        (_, ConnectionMode::Usb) => 64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dualsense_lengths() {
        assert_eq!(input_report_len(DeviceModel::DualSense, ConnectionMode::Usb), 64);
        assert_eq!(input_report_len(DeviceModel::DualSense, ConnectionMode::Bluetooth), 78);
        assert_eq!(output_report_len(DeviceModel::DualSense, ConnectionMode::Usb), 64);
        assert_eq!(output_report_len(DeviceModel::DualSenseEdge, ConnectionMode::Bluetooth), 78);
    }

    #[test]
    fn dualshock4_lengths() {
        assert_eq!(input_report_len(DeviceModel::DualShock4, ConnectionMode::Bluetooth), 547);
        assert_eq!(output_report_len(DeviceModel::DualShock4, ConnectionMode::Usb), 32);
    }
}
