//! DualSense / DualShock 4 HID protocol constants and haptic packet encoders.
//!
//! Sony's current controllers drive their voice-coil actuators with low
//! bitrate audio. The transport decides the wire format:
//!
//! # Bluetooth
//! Haptics run at 3 kHz. Each packet is 64 bytes of signed 8-bit PCM,
//! interleaved L/R, 32 stereo frames. Packets are always produced in pairs
//! from one 64-frame resampled window.
//!
//! # USB
//! The controller exposes a 48 kHz audio interface. Haptics are plain signed
//! 16-bit stereo samples, one pair per source frame, little-endian on the
//! wire.
//!
//! # VID / PID
//! - Vendor ID: 0x054C (Sony Interactive Entertainment)
//! - DualShock 4: 0x05C4, 0x09CC, 0x05C5
//! - DualSense: 0x0CE6
//! - DualSense Edge: 0x0DF2

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod connection;
pub mod ids;
pub mod output;
pub mod report;

pub use connection::ConnectionMode;
pub use ids::{
    DUALSENSE_EDGE_PRODUCT_ID, DUALSENSE_PRODUCT_ID, DUALSHOCK4_PRODUCT_IDS, DeviceModel,
    SONY_VENDOR_ID, is_supported_product,
};
pub use output::{
    BT_BLOCK_SAMPLES, BT_PACKET_FRAMES, BT_PACKET_LEN, BT_PACKETS_PER_BLOCK, HapticPacket,
    HapticSample, USB_SAMPLE_BYTES, encode_bt_block, encode_usb_frame, quantize_i8,
    quantize_i16,
};
pub use report::{BT_AUDIO_HAPTIC_REPORT_LEN, input_report_len, output_report_len};
