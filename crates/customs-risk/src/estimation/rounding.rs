/// Round half up to the nearest integer (`floor(x + 0.5)`), so 2.5 becomes 3 and -2.5
/// becomes -2.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round half up to `digits` decimal places.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    round_half_up(value * factor) / factor
}

pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(12960.0), 12960.0);
        assert_eq!(round2(1234.567), 1234.57);
        assert_eq!(round2(0.004), 0.0);
    }

    #[test]
    fn round2_is_idempotent() {
        for value in [0.125, 1999.995, 12960.0, 3.14159, 98765.4321] {
            let once = round2(value);
            assert_eq!(round2(once), once, "round2 not idempotent for {value}");
        }
    }
}
