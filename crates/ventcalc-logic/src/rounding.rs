//! Rounding rules shared by the result structures.
//!
//! Airflows and loads are reported as whole CFM and BTU/h; dimensionless
//! factors keep two or three decimals.

/// Round an airflow or load to the nearest whole unit.
pub fn round_cfm(value: f64) -> f64 {
    value.round()
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cfm_half_away_from_zero() {
        assert_eq!(round_cfm(166.666), 167.0);
        assert_eq!(round_cfm(84.5), 85.0);
        assert_eq!(round_cfm(0.4), 0.0);
    }

    #[test]
    fn test_round_to_decimals() {
        assert_eq!(round_to(0.8187, 3), 0.819);
        assert_eq!(round_to(0.8499, 2), 0.85);
    }
}
