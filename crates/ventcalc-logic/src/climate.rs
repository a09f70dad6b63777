//! Climate design conditions and altitude correction.
//!
//! Each location carries ASHRAE design conditions at two percentiles for
//! cooling (0.4% and 1% annual, dry bulb with mean coincident wet bulb) and
//! heating (99.6% and 99%), plus site elevation. Projects may instead supply
//! a custom [`DesignConditions`] set.

use serde::{Deserialize, Serialize};

use crate::constants::altitude;

/// Which cooling design percentile to size against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoolingCondition {
    /// 0.4% annual exceedance.
    #[default]
    Percent04,
    /// 1% annual exceedance.
    Percent1,
}

/// Which heating design percentile to size against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatingCondition {
    /// 99.6% annual.
    #[default]
    Percent996,
    /// 99% annual.
    Percent99,
}

/// Design-day conditions for one site (°F, ft).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignConditions {
    pub cooling_db_04: f64,
    pub cooling_wb_04: f64,
    pub cooling_db_1: f64,
    pub cooling_wb_1: f64,
    pub heating_db_996: f64,
    pub heating_db_99: f64,
    pub elevation_ft: f64,
}

impl DesignConditions {
    /// Cooling (dry bulb, wet bulb) at the selected percentile.
    pub fn cooling(&self, condition: CoolingCondition) -> (f64, f64) {
        match condition {
            CoolingCondition::Percent04 => (self.cooling_db_04, self.cooling_wb_04),
            CoolingCondition::Percent1 => (self.cooling_db_1, self.cooling_wb_1),
        }
    }

    /// Heating dry bulb at the selected percentile.
    pub fn heating(&self, condition: HeatingCondition) -> f64 {
        match condition {
            HeatingCondition::Percent996 => self.heating_db_996,
            HeatingCondition::Percent99 => self.heating_db_99,
        }
    }
}

/// A built-in climate location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub id: &'static str,
    pub name: &'static str,
    pub conditions: DesignConditions,
}

#[allow(clippy::too_many_arguments)]
const fn location(
    id: &'static str,
    name: &'static str,
    elevation_ft: f64,
    cooling_04: (f64, f64),
    cooling_1: (f64, f64),
    heating_996: f64,
    heating_99: f64,
) -> Location {
    Location {
        id,
        name,
        conditions: DesignConditions {
            cooling_db_04: cooling_04.0,
            cooling_wb_04: cooling_04.1,
            cooling_db_1: cooling_1.0,
            cooling_wb_1: cooling_1.1,
            heating_db_996: heating_996,
            heating_db_99: heating_99,
            elevation_ft,
        },
    }
}

/// Built-in design-condition table.
pub static LOCATIONS: &[Location] = &[
    location("albuquerque_nm", "Albuquerque, NM", 5310.0, (95.7, 60.3), (93.2, 60.1), 16.8, 21.4),
    location("atlanta_ga", "Atlanta, GA", 1027.0, (94.1, 74.2), (91.6, 73.9), 22.4, 26.5),
    location("boston_ma", "Boston, MA", 20.0, (91.3, 73.0), (88.0, 71.4), 7.2, 12.3),
    location("chicago_il", "Chicago, IL", 673.0, (91.7, 74.1), (88.9, 72.3), -4.1, 1.8),
    location("dallas_tx", "Dallas, TX", 551.0, (100.5, 74.4), (98.2, 74.0), 20.6, 25.4),
    location("denver_co", "Denver, CO", 5431.0, (93.6, 60.3), (91.1, 59.9), -2.4, 3.6),
    location("houston_tx", "Houston, TX", 97.0, (96.3, 76.8), (94.5, 76.6), 29.7, 33.1),
    location("los_angeles_ca", "Los Angeles, CA", 99.0, (85.9, 63.7), (82.5, 63.6), 43.3, 45.3),
    location("miami_fl", "Miami, FL", 29.0, (92.0, 77.3), (91.0, 77.1), 46.7, 50.7),
    location("new_york_ny", "New York, NY", 13.0, (90.1, 73.4), (86.9, 71.9), 13.8, 18.4),
    location("phoenix_az", "Phoenix, AZ", 1107.0, (110.8, 70.2), (108.6, 70.1), 37.7, 40.7),
    location("salt_lake_city_ut", "Salt Lake City, UT", 4227.0, (98.8, 62.1), (96.2, 61.6), 8.4, 13.9),
    location("seattle_wa", "Seattle, WA", 433.0, (86.1, 65.5), (82.4, 64.2), 23.6, 28.1),
];

/// Look up a built-in location by identifier.
pub fn find_location(id: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|l| l.id == id)
}

/// Ratio of air density at `elevation_ft` to sea-level density.
///
/// Uses the standard-atmosphere pressure relation; a value below 1.0 means
/// each cubic foot carries less air mass, so volumetric flow must rise.
/// Elevation is clamped to `0..=MAX_ELEVATION_FT`, keeping the result finite
/// and positive for any input.
pub fn altitude_correction_factor(elevation_ft: f64) -> f64 {
    let elevation = elevation_ft.max(0.0).min(altitude::MAX_ELEVATION_FT);
    (1.0 - 6.8754e-6 * elevation).powf(5.2559)
}

/// Whether a site is high enough for altitude correction to apply.
pub fn requires_altitude_correction(elevation_ft: f64) -> bool {
    elevation_ft > altitude::THRESHOLD_FT
}
