/// round_to snaps a value to the nearest multiple of `precision`.
///
/// A non-positive precision leaves the value untouched.
pub fn round_to(value: f32, precision: f32) -> f32 {
    if precision <= 0.0 {
        return value
    }
    (value / precision).round() * precision
}

/// elapsed_ms returns how long ago `then` was, relative to `now`.
///
/// A clock that runs backwards yields zero rather than wrapping.
pub fn elapsed_ms(now: u64, then: u64) -> u64 {
    now.saturating_sub(then)
}

#[cfg(test)]
mod tests {
    use crate::utils::utils::{elapsed_ms, round_to};

    #[test]
    fn test_round_to_tenth() {
        assert!((round_to(12.345, 0.1) - 12.3).abs() < 1e-4);
        assert!((round_to(-3.26, 0.1) + 3.3).abs() < 1e-4);
        assert_eq!(round_to(7.77, 0.0), 7.77);
    }

    #[test]
    fn test_elapsed_ms() {
        assert_eq!(elapsed_ms(2000, 500), 1500);
        assert_eq!(elapsed_ms(100, 500), 0);
    }
}
