//! Q5.11 fixed-point codec.
//!
//! The target datapath stores lane values as 16-bit signed integers
//! with 11 fractional bits (value = raw / 2048). One rounding policy
//! is used everywhere — add half an LSB, truncate, then saturate —
//! because hardware/software parity depends on the emitted sat
//! function and this codec agreeing bit-for-bit.

/// Total width of a lane value in bits.
pub const WIDTH: u32 = 16;

/// Fractional bits.
pub const FRAC: u32 = 11;

/// Saturation floor of the raw representation.
pub const RAW_MIN: i32 = -(1 << (WIDTH - 1));

/// Saturation ceiling of the raw representation.
pub const RAW_MAX: i32 = (1 << (WIDTH - 1)) - 1;

/// One least significant bit as a real value (2^−11).
pub const LSB: f64 = 1.0 / (1 << FRAC) as f64;

/// Encode a real value to Q5.11: round to nearest by adding half an
/// LSB before truncation, then saturate to the representable range.
pub fn encode(x: f64) -> i16 {
    let scaled = (x * (1 << FRAC) as f64 + 0.5).floor() as i64;
    scaled.clamp(RAW_MIN as i64, RAW_MAX as i64) as i16
}

/// Decode a Q5.11 raw value to a real.
pub fn decode(raw: i16) -> f64 {
    raw as f64 * LSB
}

/// Saturate a wide product accumulator (Q10.22 after a multiply) back
/// to Q5.11 with the same round-to-nearest-then-saturate policy the
/// emitted `sat16_q511` hardware function uses.
pub fn saturate(acc: i64) -> i16 {
    let rounded = acc + (1i64 << (FRAC - 1));
    let shifted = rounded >> FRAC;
    shifted.clamp(RAW_MIN as i64, RAW_MAX as i64) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_points_round_trip_exactly() {
        for raw in RAW_MIN..=RAW_MAX {
            let raw = raw as i16;
            assert_eq!(encode(decode(raw)), raw);
        }
    }

    #[test]
    fn test_round_trip_within_one_lsb() {
        let samples = [0.0, 0.3, -0.3, 1.0, -1.0, 3.14159, -2.71828, 15.9, -15.9];
        for &x in &samples {
            let err = (decode(encode(x)) - x).abs();
            assert!(err <= LSB, "x={} err={}", x, err);
        }
    }

    #[test]
    fn test_saturation_boundary() {
        assert_eq!(RAW_MIN, -32768);
        assert_eq!(RAW_MAX, 32767);
        assert_eq!(encode(100.0), RAW_MAX as i16);
        assert_eq!(encode(-100.0), RAW_MIN as i16);
        // Largest representable value and one LSB beyond it
        assert_eq!(encode(decode(RAW_MAX as i16)), RAW_MAX as i16);
        assert_eq!(encode(decode(RAW_MAX as i16) + LSB), RAW_MAX as i16);
    }

    #[test]
    fn test_rounding_adds_half_lsb() {
        // Exactly half an LSB rounds up (toward +inf), per the emitted
        // hardware sat function.
        assert_eq!(encode(0.5 * LSB), 1);
        assert_eq!(encode(0.49 * LSB), 0);
        assert_eq!(encode(-0.5 * LSB), 0);
        assert_eq!(encode(-0.51 * LSB), -1);
    }

    #[test]
    fn test_saturate_accumulator() {
        // 1.0 * 1.0 in Q5.11 is 2048 * 2048 = 2^22 in the accumulator
        let one = 2048i64;
        assert_eq!(saturate(one * one), 2048);
        assert_eq!(saturate(-(one * one)), -2048);
        assert_eq!(saturate(0), 0);
        // Half-LSB accumulator value rounds up
        assert_eq!(saturate(1 << (FRAC - 1)), 1);
        assert_eq!(saturate((1 << (FRAC - 1)) - 1), 0);
        // Overflowing accumulators clamp instead of wrapping
        assert_eq!(saturate(i64::MAX / 2), RAW_MAX as i16);
        assert_eq!(saturate(i64::MIN / 2), RAW_MIN as i16);
    }

    #[test]
    fn test_codec_matches_saturate_policy() {
        // encode(x) and saturate over the Q10.22 image of x agree on
        // the shared lattice: both add half an LSB then truncate.
        for raw in (-40960i64..40960).step_by(7) {
            let x = raw as f64 * LSB;
            let acc = raw << FRAC; // x in Q22
            assert_eq!(encode(x), saturate(acc), "x={}", x);
        }
    }
}
