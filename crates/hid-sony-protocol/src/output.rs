//! Haptic packet encoding.
//!
//! Quantizes filtered float samples in `[-1.0, 1.0]` into the two wire
//! formats. Encoding is pure: no I/O, no allocation. Non-finite samples are
//! encoded as silence.

/// Length of one Bluetooth haptic packet in bytes.
pub const BT_PACKET_LEN: usize = 64;

/// Stereo frames carried by one Bluetooth haptic packet.
pub const BT_PACKET_FRAMES: usize = BT_PACKET_LEN / 2;

/// Packets produced from one resampled window.
pub const BT_PACKETS_PER_BLOCK: usize = 2;

/// Interleaved samples in one resampled window (64 stereo frames).
pub const BT_BLOCK_SAMPLES: usize = BT_PACKET_LEN * BT_PACKETS_PER_BLOCK;

/// Serialized size of one USB haptic sample pair.
pub const USB_SAMPLE_BYTES: usize = 4;

/// One 64-byte Bluetooth haptic packet of signed 8-bit PCM.
///
/// # Packet layout
/// ```text
/// Byte 2n:     left  sample of frame n as i8
/// Byte 2n + 1: right sample of frame n as i8
/// n in 0..32
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HapticPacket([u8; BT_PACKET_LEN]);

impl HapticPacket {
    /// A packet of silence.
    pub const fn silent() -> Self {
        Self([0; BT_PACKET_LEN])
    }

    /// Wrap raw packet bytes.
    pub const fn from_bytes(bytes: [u8; BT_PACKET_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw packet bytes as written to the device.
    pub fn as_bytes(&self) -> &[u8; BT_PACKET_LEN] {
        &self.0
    }

    /// Samples reinterpreted as signed 8-bit values, interleaved L/R.
    pub fn samples(&self) -> impl Iterator<Item = i8> + '_ {
        self.0.iter().map(|b| b.cast_signed())
    }

    /// Whether every sample is zero.
    pub fn is_silent(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl Default for HapticPacket {
    fn default() -> Self {
        Self::silent()
    }
}

impl AsRef<[u8]> for HapticPacket {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for HapticPacket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HapticPacket").field(&self.0.as_slice()).finish()
    }
}

/// One USB haptic stereo sample pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HapticSample {
    /// Left actuator sample
    pub left: i16,
    /// Right actuator sample
    pub right: i16,
}

impl HapticSample {
    /// Create a sample pair.
    pub const fn new(left: i16, right: i16) -> Self {
        Self { left, right }
    }

    /// Serialize as `[left_lo, left_hi, right_lo, right_hi]`.
    pub fn to_le_bytes(self) -> [u8; USB_SAMPLE_BYTES] {
        let [l0, l1] = self.left.to_le_bytes();
        let [r0, r1] = self.right.to_le_bytes();
        [l0, l1, r0, r1]
    }

    /// Parse a serialized pair.
    pub fn from_le_bytes(bytes: [u8; USB_SAMPLE_BYTES]) -> Self {
        let [l0, l1, r0, r1] = bytes;
        Self {
            left: i16::from_le_bytes([l0, l1]),
            right: i16::from_le_bytes([r0, r1]),
        }
    }
}

#[inline]
fn sanitize(sample: f32) -> f32 {
    if sample.is_finite() {
        sample.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Quantize one sample to signed 8-bit with saturation.
///
/// The positive half scales by 127 and the negative half by 128 so that both
/// ends of the input range reach the ends of the i8 range.
///
/// # Examples
/// ```
/// use dualhaptics_hid_sony_protocol::quantize_i8;
/// assert_eq!(quantize_i8(1.0), 127);
/// assert_eq!(quantize_i8(-1.0), -128);
/// assert_eq!(quantize_i8(f32::NAN), 0);
/// ```
#[inline]
pub fn quantize_i8(sample: f32) -> i8 {
    let s = sanitize(sample);
    let scaled = if s >= 0.0 { s * 127.0 } else { s * 128.0 };
    scaled.round().clamp(-128.0, 127.0) as i8
}

/// Quantize one sample to signed 16-bit with saturation.
///
/// # Examples
/// ```
/// use dualhaptics_hid_sony_protocol::quantize_i16;
/// assert_eq!(quantize_i16(1.0), 32767);
/// assert_eq!(quantize_i16(-1.0), -32767);
/// assert_eq!(quantize_i16(f32::INFINITY), 0);
/// ```
#[inline]
pub fn quantize_i16(sample: f32) -> i16 {
    let s = sanitize(sample);
    (s * 32767.0).round().clamp(-32767.0, 32767.0) as i16
}

/// Encode one resampled window into its two Bluetooth packets.
///
/// Frames `0..32` go to the first packet and frames `32..64` to the second.
/// Both packets are returned together so callers enqueue them as a pair.
///
/// # Examples
/// ```
/// use dualhaptics_hid_sony_protocol::{BT_BLOCK_SAMPLES, encode_bt_block};
///
/// let [a, b] = encode_bt_block(&[0.0; BT_BLOCK_SAMPLES]);
/// assert!(a.is_silent() && b.is_silent());
/// ```
pub fn encode_bt_block(samples: &[f32; BT_BLOCK_SAMPLES]) -> [HapticPacket; BT_PACKETS_PER_BLOCK] {
    let mut packets = [HapticPacket::silent(); BT_PACKETS_PER_BLOCK];
    for (packet, chunk) in packets.iter_mut().zip(samples.chunks_exact(BT_PACKET_LEN)) {
        for (byte, &sample) in packet.0.iter_mut().zip(chunk) {
            *byte = quantize_i8(sample).cast_unsigned();
        }
    }
    packets
}

/// Encode one source frame as a USB sample pair.
///
/// # Examples
/// ```
/// use dualhaptics_hid_sony_protocol::{HapticSample, encode_usb_frame};
/// assert_eq!(encode_usb_frame(0.0, 0.0), HapticSample::default());
/// assert_eq!(encode_usb_frame(2.0, -2.0), HapticSample::new(32767, -32767));
/// ```
#[inline]
pub fn encode_usb_frame(left: f32, right: f32) -> HapticSample {
    HapticSample {
        left: quantize_i16(left),
        right: quantize_i16(right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bt_saturation_limits() {
        assert_eq!(quantize_i8(1.0), 127);
        assert_eq!(quantize_i8(5.0), 127);
        assert_eq!(quantize_i8(-1.0), -128);
        assert_eq!(quantize_i8(-5.0), -128);
        assert_eq!(quantize_i8(0.0), 0);
    }

    #[test]
    fn usb_saturation_limits() {
        assert_eq!(quantize_i16(1.0), 32767);
        assert_eq!(quantize_i16(-1.0), -32767);
        assert_eq!(quantize_i16(0.5), 16384);
    }

    #[test]
    fn non_finite_is_silence() {
        for x in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert_eq!(quantize_i8(x), 0);
            assert_eq!(quantize_i16(x), 0);
        }
    }

    #[test]
    fn bt_block_split_point() {
        let mut samples = [0.0f32; BT_BLOCK_SAMPLES];
        for s in samples.iter_mut().skip(BT_PACKET_LEN) {
            *s = 1.0;
        }
        let [first, second] = encode_bt_block(&samples);
        assert!(first.is_silent());
        assert!(second.samples().all(|s| s == 127));
    }

    #[test]
    fn bt_negative_bytes_reinterpret() {
        let mut samples = [0.0f32; BT_BLOCK_SAMPLES];
        samples[0] = -1.0;
        samples[1] = 1.0;
        let [first, _] = encode_bt_block(&samples);
        assert_eq!(first.as_bytes()[0], 0x80);
        assert_eq!(first.as_bytes()[1], 0x7F);
    }

    #[test]
    fn usb_sample_le_layout() {
        let sample = HapticSample::new(0x0102, -2);
        assert_eq!(sample.to_le_bytes(), [0x02, 0x01, 0xFE, 0xFF]);
        assert_eq!(HapticSample::from_le_bytes(sample.to_le_bytes()), sample);
    }
}
