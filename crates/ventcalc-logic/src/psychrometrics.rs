//! Approximate moist-air properties for ventilation load estimates.
//!
//! These are not a psychrometric library. The humidity ratio comes from a
//! linear dew-point estimate and a Magnus-type saturation pressure curve,
//! which is within a few percent of chart values across normal design
//! conditions. Inputs are in °F and are never range-checked.

/// Standard sea-level atmospheric pressure (kPa).
const STANDARD_PRESSURE_KPA: f64 = 101.325;
/// Ratio of molecular weights, water vapor / dry air.
const MOLECULAR_WEIGHT_RATIO: f64 = 0.622;
/// Dew point depression per degree of wet-bulb depression.
const DEW_POINT_SLOPE: f64 = 0.425;

fn fahrenheit_to_celsius(t: f64) -> f64 {
    (t - 32.0) * 5.0 / 9.0
}

/// Saturation vapor pressure over water (kPa), Magnus form.
fn saturation_pressure_kpa(temp_c: f64) -> f64 {
    0.61094 * (17.625 * temp_c / (temp_c + 243.04)).exp()
}

/// Estimate the dew point (°F) from dry bulb and wet bulb (°F).
pub fn estimate_dew_point(dry_bulb: f64, wet_bulb: f64) -> f64 {
    wet_bulb - DEW_POINT_SLOPE * (dry_bulb - wet_bulb)
}

/// Estimate the humidity ratio (lb water / lb dry air) from dry bulb and
/// wet bulb in °F.
///
/// Returns 0.0 rather than a negative or non-finite value when the inputs
/// are outside the range the approximation can represent.
pub fn estimate_humidity_ratio(dry_bulb: f64, wet_bulb: f64) -> f64 {
    let dew_point_c = fahrenheit_to_celsius(estimate_dew_point(dry_bulb, wet_bulb));
    let pw = saturation_pressure_kpa(dew_point_c);
    let dry_air = STANDARD_PRESSURE_KPA - pw;
    if !pw.is_finite() || dry_air <= 0.0 {
        return 0.0;
    }
    (MOLECULAR_WEIGHT_RATIO * pw / dry_air).max(0.0)
}

/// Specific enthalpy of moist air (BTU/lb dry air).
///
/// `h = 0.24·T + W·(1061 + 0.444·T)`
pub fn calculate_enthalpy(dry_bulb: f64, humidity_ratio: f64) -> f64 {
    0.24 * dry_bulb + humidity_ratio * (1061.0 + 0.444 * dry_bulb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_summer_design_humidity_ratio_near_chart() {
        // Chart value at 95/75 °F is about 0.0142
        let w = estimate_humidity_ratio(95.0, 75.0);
        assert_abs_diff_eq!(w, 0.0142, epsilon = 0.001);
    }

    #[test]
    fn test_saturated_air_dew_point_equals_wet_bulb() {
        assert_eq!(estimate_dew_point(70.0, 70.0), 70.0);
    }

    #[test]
    fn test_humidity_ratio_rises_with_wet_bulb() {
        let dry = estimate_humidity_ratio(90.0, 60.0);
        let humid = estimate_humidity_ratio(90.0, 78.0);
        assert!(humid > dry);
    }

    #[test]
    fn test_absurd_inputs_degrade_to_zero() {
        assert_eq!(estimate_humidity_ratio(900.0, 700.0), 0.0);
        let w = estimate_humidity_ratio(-200.0, -250.0);
        assert!(w >= 0.0 && w.is_finite());
    }

    #[test]
    fn test_enthalpy_dry_air() {
        assert_abs_diff_eq!(calculate_enthalpy(75.0, 0.0), 18.0, epsilon = 1e-12);
    }

    #[test]
    fn test_enthalpy_indoor_reference() {
        // 0.24·75 + 0.009·(1061 + 33.3)
        assert_abs_diff_eq!(calculate_enthalpy(75.0, 0.009), 27.8487, epsilon = 1e-4);
    }
}
