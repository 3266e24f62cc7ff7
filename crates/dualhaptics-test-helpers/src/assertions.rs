//! Assertions for float samples and haptic payloads.

use dualhaptics_hid_sony_protocol::{BT_PACKET_LEN, HapticPacket, HapticSample};

/// Assert that two floating-point values are approximately equal.
///
/// ```rust
/// use dualhaptics_test_helpers::assert_approx_eq;
///
/// assert_approx_eq!(1.0f32, 1.0001, 0.001);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        let diff = (left - right).abs();
        if diff > tolerance {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`",
                left, right, diff, tolerance
            );
        }
    };
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        let diff = (left - right).abs();
        if diff > tolerance {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`: {}",
                left, right, diff, tolerance, format_args!($($arg)+)
            );
        }
    };
}

/// Assert every packet is 64 zero bytes.
#[track_caller]
pub fn assert_silent_packets(packets: &[HapticPacket]) {
    for (i, packet) in packets.iter().enumerate() {
        assert!(packet.is_silent(), "packet {i} is not silent: {packet:?}");
    }
}

/// Assert every USB pair is `(0, 0)`.
#[track_caller]
pub fn assert_silent_samples(samples: &[HapticSample]) {
    for (i, sample) in samples.iter().enumerate() {
        assert_eq!(
            (sample.left, sample.right),
            (0, 0),
            "sample {i} is not silent"
        );
    }
}

/// Split raw Bluetooth writes back into packets, asserting each is 64 bytes.
#[track_caller]
pub fn packets_from_writes(writes: &[Vec<u8>]) -> Vec<HapticPacket> {
    writes
        .iter()
        .enumerate()
        .map(|(i, write)| {
            let bytes: [u8; BT_PACKET_LEN] = match write.as_slice().try_into() {
                Ok(bytes) => bytes,
                Err(_) => panic!("write {i} is {} bytes, expected {BT_PACKET_LEN}", write.len()),
            };
            HapticPacket::from_bytes(bytes)
        })
        .collect()
}

/// Decode a batched USB write into sample pairs.
#[track_caller]
pub fn samples_from_usb_write(write: &[u8]) -> Vec<HapticSample> {
    assert_eq!(write.len() % 4, 0, "USB write is not a whole number of pairs");
    write
        .chunks_exact(4)
        .map(|chunk| HapticSample::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}
