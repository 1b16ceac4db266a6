//! Rounding of averages for display.

/// Round `value` to the nearest multiple of `step`, halves away from zero.
pub fn round_to_nearest(value: f64, step: f64) -> f64 {
    // f64::round already rounds half away from zero
    (value / step).round() * step
}

/// Round to the nearest 0.5. Every surfaced average goes through this.
pub fn round_to_nearest_half(value: f64) -> f64 {
    round_to_nearest(value, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_nearest_half() {
        assert_eq!(round_to_nearest_half(3.25), 3.5);
        assert_eq!(round_to_nearest_half(3.24), 3.0);
        assert_eq!(round_to_nearest_half(4.75), 5.0);
        assert_eq!(round_to_nearest_half(4.5), 4.5);
        assert_eq!(round_to_nearest_half(0.0), 0.0);
        assert_eq!(round_to_nearest_half(13.0 / 3.0), 4.5);
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(round_to_nearest(2.5, 1.0), 3.0);
        assert_eq!(round_to_nearest(-2.5, 1.0), -3.0);
        assert_eq!(round_to_nearest_half(-0.25), -0.5);
    }

    #[test]
    fn test_idempotent() {
        let mut value = 0.0;
        while value <= 5.0 {
            let once = round_to_nearest_half(value);
            assert_eq!(round_to_nearest_half(once), once, "not idempotent at {}", value);
            value += 0.01;
        }
    }
}
