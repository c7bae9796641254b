//! Fixed-point encoding of node coordinates.
//!
//! Coordinates are stored as integers so documents do not depend on how a
//! particular writer formats floating-point numbers. Precision finer than
//! `1 / scale` document units is lost.

/// Default coordinate scale: three decimal digits below one document unit
pub const SCALE: f64 = 1000.0;

/// Encode a coordinate as `round(value * scale)`.
///
/// Ties round away from zero (`0.0025 -> 3`, `-0.0005 -> -1` at the default
/// scale). Values beyond the `i64` range saturate and NaN encodes as 0.
pub fn encode(value: f64, scale: f64) -> i64 {
    (value * scale).round() as i64
}

/// Decode a stored coordinate
pub fn decode(encoded: i64, scale: f64) -> f64 {
    encoded as f64 / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_at_half_boundaries() {
        assert_eq!(encode(1.2345, SCALE), 1235);
        assert_eq!(encode(-0.0005, SCALE), -1);
        assert_eq!(encode(0.0005, SCALE), 1);
        assert_eq!(encode(0.0025, SCALE), 3);
        assert_eq!(encode(-0.0015, SCALE), -2);
    }

    #[test]
    fn test_rounding_below_half() {
        assert_eq!(encode(0.1234, SCALE), 123);
        assert_eq!(encode(-0.0004, SCALE), 0);
    }

    #[test]
    fn test_saturation_and_nan() {
        assert_eq!(encode(f64::MAX, SCALE), i64::MAX);
        assert_eq!(encode(f64::MIN, SCALE), i64::MIN);
        assert_eq!(encode(f64::NAN, SCALE), 0);
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode(1235, SCALE), 1.235);
        assert_eq!(decode(-1, SCALE), -0.001);
        assert_eq!(decode(0, SCALE), 0.0);
    }

    #[test]
    fn test_custom_scale() {
        assert_eq!(encode(1.25, 10.0), 13);
        assert_eq!(decode(13, 10.0), 1.3);
    }
}
