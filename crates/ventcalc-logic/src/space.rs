//! Space calculator: breathing-zone, zone, exhaust, and supply airflow.
//!
//! One space is evaluated in isolation:
//!
//! 1. Rp/Ra from the space-type table unless overridden.
//! 2. Occupancy from the override or the type's default density.
//! 3. Vbz = Rp·Pz + Ra·Az, with a ventilation ACH override acting as a floor.
//! 4. Voz = Vbz / Ez.
//! 5. Exhaust from area or fixture rates, floored by an exhaust ACH override.
//! 6. Supply covers the larger of Voz and exhaust unless a supply ACH
//!    override replaces it.
//!
//! Nothing here fails: missing inputs resolve to the values in
//! [`crate::constants::fallback`].

use log::{debug, trace};
use serde::Serialize;

use crate::constants::{air, fallback};
use crate::model::Space;
use crate::rounding::round_cfm;
use crate::space_types::{self, SpaceType};

/// Which method set an airflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AirflowBasis {
    /// ASHRAE rate procedure (Rp/Ra or exhaust table).
    Code,
    /// Air-changes-per-hour requirement exceeded the code value.
    Ach,
}

/// Which requirement set the supply airflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyBasis {
    /// Zone outdoor air Voz.
    Ventilation,
    /// Exhaust makeup.
    Exhaust,
    /// Explicit supply ACH override.
    AchOverride,
}

/// Calculated airflows for one space. CFM fields are whole numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpaceVentilationResult {
    pub space_id: String,
    pub space_name: String,
    pub space_type: String,
    pub zone_id: Option<String>,
    pub area: f64,
    pub volume: f64,
    /// Occupancy used (people).
    pub occupancy: f64,
    /// People rate used (CFM/person).
    pub rp: f64,
    /// Area rate used (CFM/ft²).
    pub ra: f64,
    /// Zone air-distribution effectiveness applied.
    pub ez: f64,
    pub vbz_code: f64,
    pub vbz_ach: f64,
    pub vbz: f64,
    pub voz: f64,
    pub exhaust_code: f64,
    pub exhaust_ach: f64,
    pub exhaust: f64,
    pub supply: f64,
    pub ventilation_basis: AirflowBasis,
    pub exhaust_basis: AirflowBasis,
    pub supply_basis: SupplyBasis,
}

/// Max-of-two-methods rule: an ACH-derived airflow can raise a code
/// airflow but never lower it.
pub fn resolve_with_ach_floor(code_value: f64, ach_value: Option<f64>) -> f64 {
    match ach_value {
        Some(ach) => code_value.max(ach),
        None => code_value,
    }
}

/// Convert air changes per hour to CFM for a volume in ft³.
pub fn ach_to_cfm(ach: f64, volume: f64) -> f64 {
    ach * volume / air::MINUTES_PER_HOUR
}

/// Effective (Rp, Ra): explicit overrides, then the table, then fallback.
pub fn resolve_rates(space: &Space, space_type: Option<&SpaceType>) -> (f64, f64) {
    let rp = space
        .rp_override
        .or(space_type.map(|t| t.rp))
        .unwrap_or(fallback::RP);
    let ra = space
        .ra_override
        .or(space_type.map(|t| t.ra))
        .unwrap_or(fallback::RA);
    (rp, ra)
}

/// Design occupancy: explicit override, else default density × area/1000.
pub fn resolve_occupancy(space: &Space, space_type: Option<&SpaceType>) -> f64 {
    space.occupancy_override.unwrap_or_else(|| {
        let density = space_type.map_or(fallback::OCCUPANT_DENSITY, |t| t.occupant_density);
        density * space.area / 1000.0
    })
}

/// Plumbing fixtures assumed when the space does not state a count.
pub fn estimate_fixtures(occupancy: f64) -> f64 {
    (occupancy / fallback::OCCUPANTS_PER_FIXTURE).ceil().max(1.0)
}

/// Calculate ventilation, exhaust, and supply airflow for one space.
///
/// `zone_ez` is the owning zone's air-distribution effectiveness; callers
/// pass [`fallback::EZ`] for spaces outside any zone. It must be positive.
pub fn calculate_space_ventilation(space: &Space, zone_ez: f64) -> SpaceVentilationResult {
    let space_type = space_types::find(&space.space_type);
    if space_type.is_none() {
        debug!(
            "space {} has unknown type '{}', using fallback Rp/Ra",
            space.id, space.space_type
        );
    }
    let (rp, ra) = resolve_rates(space, space_type);
    let occupancy = resolve_occupancy(space, space_type);
    let volume = space.volume();

    // Ventilation
    let vbz_code = rp * occupancy + ra * space.area;
    let vbz_ach = space.ventilation_ach.map(|ach| ach_to_cfm(ach, volume));
    let vbz = round_cfm(resolve_with_ach_floor(vbz_code, vbz_ach));
    let voz = round_cfm(vbz / zone_ez);

    // Exhaust
    let fixtures = space
        .fixture_count
        .map(f64::from)
        .unwrap_or_else(|| estimate_fixtures(occupancy));
    let exhaust_code = space_type
        .and_then(|t| t.exhaust)
        .map_or(0.0, |rate| rate.required_cfm(space.area, fixtures));
    let exhaust_ach = space.exhaust_ach.map(|ach| ach_to_cfm(ach, volume));
    let exhaust = round_cfm(resolve_with_ach_floor(exhaust_code, exhaust_ach));

    // Supply
    let (supply, supply_basis) = match space.supply_ach {
        Some(ach) => (round_cfm(ach_to_cfm(ach, volume)), SupplyBasis::AchOverride),
        None if exhaust > voz => (exhaust, SupplyBasis::Exhaust),
        None => (voz, SupplyBasis::Ventilation),
    };

    let vbz_ach = vbz_ach.unwrap_or(0.0);
    let exhaust_ach = exhaust_ach.unwrap_or(0.0);

    trace!(
        "space {}: Pz={:.1} Vbz={} Voz={} exhaust={} supply={}",
        space.id,
        occupancy,
        vbz,
        voz,
        exhaust,
        supply
    );

    SpaceVentilationResult {
        space_id: space.id.clone(),
        space_name: space.name.clone(),
        space_type: space.space_type.clone(),
        zone_id: space.zone_id.clone(),
        area: space.area,
        volume,
        occupancy,
        rp,
        ra,
        ez: zone_ez,
        vbz_code: round_cfm(vbz_code),
        vbz_ach: round_cfm(vbz_ach),
        vbz,
        voz,
        exhaust_code: round_cfm(exhaust_code),
        exhaust_ach: round_cfm(exhaust_ach),
        exhaust,
        supply,
        ventilation_basis: basis_of(vbz_code, vbz_ach),
        exhaust_basis: basis_of(exhaust_code, exhaust_ach),
        supply_basis,
    }
}

fn basis_of(code_value: f64, ach_value: f64) -> AirflowBasis {
    if ach_value > code_value {
        AirflowBasis::Ach
    } else {
        AirflowBasis::Code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn office(area: f64) -> Space {
        Space::new("s1", "Open Office", area, 10.0, "office_space")
    }

    #[test]
    fn test_ach_floor_never_reduces() {
        assert_eq!(resolve_with_ach_floor(85.0, None), 85.0);
        assert_eq!(resolve_with_ach_floor(85.0, Some(40.0)), 85.0);
        assert_eq!(resolve_with_ach_floor(85.0, Some(167.0)), 167.0);
    }

    #[test]
    fn test_default_office_vbz() {
        let r = calculate_space_ventilation(&office(1000.0), 1.0);
        assert_eq!(r.occupancy, 5.0);
        assert_eq!(r.vbz, 85.0);
        assert_eq!(r.voz, 85.0);
        assert_eq!(r.ventilation_basis, AirflowBasis::Code);
        assert_eq!(r.vbz_ach, 0.0);
    }

    #[test]
    fn test_ach_override_wins_when_larger() {
        let mut space = office(1000.0);
        space.ventilation_ach = Some(1.0);
        let r = calculate_space_ventilation(&space, 1.0);
        assert_eq!(r.vbz_ach, 167.0);
        assert_eq!(r.vbz, 167.0);
        assert_eq!(r.ventilation_basis, AirflowBasis::Ach);
    }

    #[test]
    fn test_ach_override_ignored_when_smaller() {
        let mut space = office(1000.0);
        space.ventilation_ach = Some(0.25);
        let r = calculate_space_ventilation(&space, 1.0);
        assert_eq!(r.vbz, 85.0);
        assert_eq!(r.ventilation_basis, AirflowBasis::Code);
    }

    #[test]
    fn test_ez_scales_voz() {
        let r = calculate_space_ventilation(&office(1000.0), 0.8);
        assert_eq!(r.voz, 106.0); // 85 / 0.8 = 106.25
    }

    #[test]
    fn test_unknown_type_uses_fallbacks() {
        let space = Space::new("s1", "Mystery", 2000.0, 10.0, "not_a_type");
        let r = calculate_space_ventilation(&space, 1.0);
        assert_eq!(r.rp, fallback::RP);
        assert_eq!(r.ra, fallback::RA);
        assert_eq!(r.occupancy, 10.0);
        assert_eq!(r.vbz, 170.0);
        assert_eq!(r.exhaust, 0.0);
    }

    #[test]
    fn test_overrides_replace_table_values() {
        let mut space = office(1000.0);
        space.rp_override = Some(10.0);
        space.ra_override = Some(0.12);
        space.occupancy_override = Some(12.0);
        let r = calculate_space_ventilation(&space, 1.0);
        assert_eq!(r.vbz, 240.0); // 10·12 + 0.12·1000
    }

    #[test]
    fn test_fixture_exhaust_estimated_from_occupancy() {
        let mut space = Space::new("t1", "Restroom", 200.0, 9.0, "toilet_public");
        space.occupancy_override = Some(25.0);
        let r = calculate_space_ventilation(&space, 1.0);
        // ceil(25 / 10) = 3 fixtures × 50 CFM
        assert_eq!(r.exhaust, 150.0);
        assert_eq!(r.supply, 150.0);
        assert_eq!(r.supply_basis, SupplyBasis::Exhaust);
    }

    #[test]
    fn test_explicit_fixture_count() {
        let mut space = Space::new("t1", "Restroom", 200.0, 9.0, "toilet_public");
        space.fixture_count = Some(4);
        let r = calculate_space_ventilation(&space, 1.0);
        assert_eq!(r.exhaust, 200.0);
    }

    #[test]
    fn test_exhaust_ach_floor() {
        let mut space = Space::new("j1", "Janitor", 50.0, 9.0, "janitor_closet");
        space.exhaust_ach = Some(10.0);
        let r = calculate_space_ventilation(&space, 1.0);
        assert_eq!(r.exhaust_code, 50.0);
        assert_eq!(r.exhaust, 75.0); // 10 × 450 / 60
        assert_eq!(r.exhaust_basis, AirflowBasis::Ach);
    }

    #[test]
    fn test_supply_override_wins_outright() {
        let mut space = office(1000.0);
        space.supply_ach = Some(0.3);
        let r = calculate_space_ventilation(&space, 1.0);
        assert_eq!(r.supply, 50.0);
        assert!(r.supply < r.voz);
        assert_eq!(r.supply_basis, SupplyBasis::AchOverride);
    }

    #[test]
    fn test_healthcare_ach_minimums_do_not_drive_airflow() {
        let space = Space::new("or1", "OR 1", 600.0, 10.0, "operating_room");
        let r = calculate_space_ventilation(&space, 1.0);
        // 5·12 + 0.06·600; the 4/20 ACH table minimums are advisory only
        assert_eq!(r.vbz, 96.0);
        assert_eq!(r.vbz_ach, 0.0);
        assert_eq!(r.ventilation_basis, AirflowBasis::Code);
        assert_eq!(r.supply, 96.0);
        assert_eq!(r.supply_basis, SupplyBasis::Ventilation);
    }

    #[test]
    fn test_healthcare_ach_override_still_applies() {
        let mut space = Space::new("or1", "OR 1", 600.0, 10.0, "operating_room");
        space.ventilation_ach = Some(4.0);
        let r = calculate_space_ventilation(&space, 1.0);
        assert_eq!(r.vbz, 400.0); // 4 × 6000 / 60
        assert_eq!(r.ventilation_basis, AirflowBasis::Ach);
        assert_eq!(r.supply, 400.0);
    }

    #[test]
    fn test_zero_area_space_is_zero() {
        let r = calculate_space_ventilation(&office(0.0), 1.0);
        assert_eq!(r.vbz, 0.0);
        assert_eq!(r.supply, 0.0);
    }
}
