//! Property-based tests for haptic quantization and packet framing.
//!
//! Uses proptest with 500 cases to verify correctness properties independent
//! of specific sample values.

use dualhaptics_hid_sony_protocol::{
    BT_BLOCK_SAMPLES, BT_PACKET_LEN, HapticSample, encode_bt_block, encode_usb_frame,
    quantize_i8, quantize_i16,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Sign of the input sample must be preserved after quantization.
    #[test]
    fn prop_sign_preserved(sample in -1.0f32..=1.0f32) {
        let q8 = quantize_i8(sample);
        let q16 = quantize_i16(sample);
        if sample > 0.01 {
            prop_assert!(q8 > 0, "positive {sample} encoded as {q8}");
            prop_assert!(q16 > 0, "positive {sample} encoded as {q16}");
        } else if sample < -0.01 {
            prop_assert!(q8 < 0, "negative {sample} encoded as {q8}");
            prop_assert!(q16 < 0, "negative {sample} encoded as {q16}");
        }
    }

    /// Out-of-range input saturates instead of wrapping.
    #[test]
    fn prop_no_wrap(sample in -1000.0f32..=1000.0f32) {
        let q16 = quantize_i16(sample);
        prop_assert!((-32767..=32767).contains(&q16));
        if sample >= 1.0 {
            prop_assert_eq!(quantize_i8(sample), 127);
            prop_assert_eq!(q16, 32767);
        }
        if sample <= -1.0 {
            prop_assert_eq!(quantize_i8(sample), -128);
            prop_assert_eq!(q16, -32767);
        }
    }

    /// In-range samples round-trip within one quantization step.
    #[test]
    fn prop_round_trip_error(sample in -1.0f32..=1.0f32) {
        let q16 = f32::from(quantize_i16(sample)) / 32767.0;
        prop_assert!((q16 - sample).abs() <= 1.0 / 32767.0);

        let q8 = quantize_i8(sample);
        let decoded = if q8 >= 0 { f32::from(q8) / 127.0 } else { f32::from(q8) / 128.0 };
        prop_assert!((decoded - sample).abs() <= 1.0 / 127.0);
    }

    /// Every sample lands at its interleaved position in the right packet.
    #[test]
    fn prop_bt_block_positions(
        values in proptest::collection::vec(-1.0f32..=1.0, BT_BLOCK_SAMPLES),
    ) {
        let mut block = [0.0f32; BT_BLOCK_SAMPLES];
        block.copy_from_slice(&values);
        let packets = encode_bt_block(&block);

        let flattened: Vec<i8> = packets.iter().flat_map(|p| p.samples()).collect();
        prop_assert_eq!(flattened.len(), BT_BLOCK_SAMPLES);
        for (i, (&q, &x)) in flattened.iter().zip(values.iter()).enumerate() {
            prop_assert_eq!(q, quantize_i8(x), "sample {} in packet {}", i, i / BT_PACKET_LEN);
        }
    }

    /// USB pairs serialize little-endian, left first.
    #[test]
    fn prop_usb_serialization(left in -1.0f32..=1.0, right in -1.0f32..=1.0) {
        let sample = encode_usb_frame(left, right);
        let bytes = sample.to_le_bytes();
        prop_assert_eq!(i16::from_le_bytes([bytes[0], bytes[1]]), sample.left);
        prop_assert_eq!(i16::from_le_bytes([bytes[2], bytes[3]]), sample.right);
        prop_assert_eq!(HapticSample::from_le_bytes(bytes), sample);
    }

    /// Non-finite samples mixed into a block become zero bytes.
    #[test]
    fn prop_non_finite_silenced(position in 0usize..BT_BLOCK_SAMPLES, kind in 0u8..3) {
        let mut block = [0.0f32; BT_BLOCK_SAMPLES];
        block[position] = match kind {
            0 => f32::NAN,
            1 => f32::INFINITY,
            _ => f32::NEG_INFINITY,
        };
        let packets = encode_bt_block(&block);
        prop_assert!(packets.iter().all(|p| p.is_silent()));
    }
}
