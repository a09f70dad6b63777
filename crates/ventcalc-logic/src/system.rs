//! System aggregator: outdoor-air intake and ventilation loads per AHU.
//!
//! Follows the ASHRAE 62.1 multi-zone procedure in simplified form:
//!
//! - Vou = D·Σ(Rp·Pz) + Σ(Ra·Az) across every space the system serves.
//!   Diversity only touches the people term.
//! - Ev is 1.0 for single-zone and DOAS systems. VAV systems use
//!   `max(min(1/maxZp, 1)·0.85, 0.6)`, a conservative stand-in for the
//!   iterative Table 6-3 method.
//! - Vot = Vou / Ev, then divided by the air-density ratio above 2000 ft
//!   when altitude correction is on.
//! - Loads use design weather, optionally pre-treated by an ERV.

use log::debug;
use serde::Serialize;

use crate::climate::{self, DesignConditions};
use crate::constants::{air, efficiency, fallback, indoor_reference};
use crate::model::{AirSystem, ProjectSettings, Space, SystemType, Zone};
use crate::psychrometrics::{calculate_enthalpy, estimate_humidity_ratio};
use crate::rounding::{round_cfm, round_to};
use crate::zone::{calculate_zone_ventilation, ZoneVentilationResult};

/// Where design temperatures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionSource {
    Custom,
    Location,
    Fallback,
}

/// Outdoor design temperatures selected for a calculation (°F).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DesignTemperatures {
    pub cooling_db: f64,
    pub cooling_wb: f64,
    pub heating_db: f64,
    /// Site elevation (ft), when known.
    pub elevation_ft: Option<f64>,
    pub source: ConditionSource,
}

/// Sensible, latent, and total ventilation loads (BTU/h).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct VentilationLoads {
    pub cooling_sensible: f64,
    pub cooling_latent: f64,
    pub cooling_total: f64,
    pub heating_sensible: f64,
}

/// Aggregated outdoor air and loads for one air system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemVentilationResult {
    pub system_id: String,
    pub system_name: String,
    pub system_type: SystemType,
    pub total_area: f64,
    pub total_occupancy: f64,
    pub diversity_factor: f64,
    pub diversified_occupancy: f64,
    /// Uncorrected outdoor-air intake (CFM).
    pub vou: f64,
    /// Worst-case zone primary outdoor-air fraction after the 0.5 floor.
    pub max_zp: f64,
    pub ev: f64,
    /// Corrected outdoor-air intake (CFM), including altitude correction.
    pub vot: f64,
    pub altitude_correction_factor: f64,
    pub total_exhaust: f64,
    pub total_supply: f64,
    pub design: DesignTemperatures,
    /// Cooling dry bulb after ERV pre-treatment (°F).
    pub effective_cooling_db: f64,
    /// Cooling wet bulb after ERV pre-treatment (°F).
    pub effective_cooling_wb: f64,
    /// Heating dry bulb after ERV pre-treatment (°F).
    pub effective_heating_db: f64,
    /// Advisory outdoor-air CFM equivalent recovered by the ERV.
    pub erv_savings_cfm: f64,
    pub loads: VentilationLoads,
    pub zones: Vec<ZoneVentilationResult>,
}

/// Pick outdoor design temperatures: custom set, then location, then the
/// generic fallback.
pub fn resolve_design_temperatures(settings: &ProjectSettings) -> DesignTemperatures {
    let (conditions, source): (Option<DesignConditions>, ConditionSource) =
        match (&settings.custom_conditions, &settings.location_id) {
            (Some(custom), _) => (Some(*custom), ConditionSource::Custom),
            (None, Some(id)) => match climate::find_location(id) {
                Some(location) => (Some(location.conditions), ConditionSource::Location),
                None => {
                    debug!("unknown location '{}', using fallback design temperatures", id);
                    (None, ConditionSource::Fallback)
                }
            },
            (None, None) => (None, ConditionSource::Fallback),
        };

    match conditions {
        Some(c) => {
            let (cooling_db, cooling_wb) = c.cooling(settings.cooling_condition);
            DesignTemperatures {
                cooling_db,
                cooling_wb,
                heating_db: c.heating(settings.heating_condition),
                elevation_ft: Some(c.elevation_ft),
                source,
            }
        }
        None => DesignTemperatures {
            cooling_db: fallback::COOLING_DRY_BULB,
            cooling_wb: fallback::COOLING_WET_BULB,
            heating_db: fallback::HEATING_DRY_BULB,
            elevation_ft: None,
            source,
        },
    }
}

/// System ventilation efficiency Ev.
pub fn system_ventilation_efficiency(system_type: SystemType, max_zp: f64) -> f64 {
    match system_type {
        SystemType::SingleZone | SystemType::Doas => 1.0,
        SystemType::VavMultiZone => {
            let zp = max_zp.max(efficiency::MIN_ZP);
            ((1.0 / zp).min(1.0) * efficiency::VAV_DERATE).max(efficiency::MIN_EV)
        }
    }
}

/// Move an outdoor temperature toward `target` by the recovery effectiveness.
pub fn pretreat(outdoor: f64, target: f64, effectiveness: f64) -> f64 {
    outdoor - effectiveness * (outdoor - target)
}

/// Ventilation loads for `vot` CFM of outdoor air at the given conditions.
pub fn ventilation_loads(
    vot: f64,
    cooling_db: f64,
    cooling_wb: f64,
    heating_db: f64,
    settings: &ProjectSettings,
) -> VentilationLoads {
    let cooling_delta = (cooling_db - settings.indoor_summer_db).max(0.0);
    let heating_delta = (settings.indoor_winter_db - heating_db).max(0.0);
    let cooling_sensible = air::SENSIBLE_FACTOR * vot * cooling_delta;
    let heating_sensible = air::SENSIBLE_FACTOR * vot * heating_delta;

    let outdoor_w = estimate_humidity_ratio(cooling_db, cooling_wb);
    let outdoor_h = calculate_enthalpy(cooling_db, outdoor_w);
    let indoor_h = calculate_enthalpy(
        indoor_reference::DRY_BULB,
        indoor_reference::HUMIDITY_RATIO,
    );
    let cooling_total = air::TOTAL_FACTOR * vot * (outdoor_h - indoor_h).max(0.0);

    let cooling_sensible = round_cfm(cooling_sensible);
    let cooling_total = round_cfm(cooling_total);
    VentilationLoads {
        cooling_sensible,
        cooling_latent: (cooling_total - cooling_sensible).max(0.0),
        cooling_total,
        heating_sensible: round_cfm(heating_sensible),
    }
}

/// Calculate outdoor-air intake and loads for one system.
///
/// Zones are selected from `all_zones` by `system_id`; spaces from
/// `all_spaces` by `zone_id`. A system with no zones returns zero airflow
/// and zero loads.
pub fn calculate_system_ventilation(
    system: &AirSystem,
    all_zones: &[Zone],
    all_spaces: &[Space],
    settings: &ProjectSettings,
) -> SystemVentilationResult {
    let zones: Vec<ZoneVentilationResult> = all_zones
        .iter()
        .filter(|z| z.system_id.as_deref() == Some(system.id.as_str()))
        .map(|z| calculate_zone_ventilation(z, all_spaces))
        .collect();

    let diversity = system.occupancy_diversity;
    let total_occupancy: f64 = zones.iter().map(|z| z.total_occupancy).sum();
    let total_area: f64 = zones.iter().map(|z| z.total_area).sum();

    let (people_term, area_term) = zones
        .iter()
        .flat_map(|z| z.spaces.iter())
        .fold((0.0, 0.0), |(people, area), s| {
            (people + s.rp * s.occupancy, area + s.ra * s.area)
        });
    let vou = diversity * people_term + area_term;

    let max_zp = zones
        .iter()
        .map(|z| z.zp)
        .fold(efficiency::MIN_ZP, f64::max);
    let ev = system_ventilation_efficiency(system.system_type, max_zp);
    let mut vot = vou / ev;

    let design = resolve_design_temperatures(settings);
    let mut altitude_factor = 1.0;
    if settings.altitude_correction {
        if let Some(elevation) = design.elevation_ft {
            if climate::requires_altitude_correction(elevation) {
                altitude_factor = climate::altitude_correction_factor(elevation);
                vot /= altitude_factor;
            }
        }
    }

    let (effective_cooling_db, effective_cooling_wb, effective_heating_db) = if system.erv_enabled {
        (
            pretreat(
                design.cooling_db,
                settings.indoor_summer_db,
                system.erv_sensible_efficiency,
            ),
            pretreat(
                design.cooling_wb,
                indoor_reference::ERV_WET_BULB,
                system.erv_latent_efficiency,
            ),
            pretreat(
                design.heating_db,
                settings.indoor_winter_db,
                system.erv_sensible_efficiency,
            ),
        )
    } else {
        (design.cooling_db, design.cooling_wb, design.heating_db)
    };

    let erv_savings_cfm = if system.erv_enabled {
        let untreated = (design.cooling_db - settings.indoor_summer_db).max(0.0)
            + (settings.indoor_winter_db - design.heating_db).max(0.0);
        let treated = (effective_cooling_db - settings.indoor_summer_db).max(0.0)
            + (settings.indoor_winter_db - effective_heating_db).max(0.0);
        if untreated > 0.0 {
            vot * (1.0 - treated / untreated)
        } else {
            0.0
        }
    } else {
        0.0
    };

    let loads = ventilation_loads(
        vot,
        effective_cooling_db,
        effective_cooling_wb,
        effective_heating_db,
        settings,
    );

    debug!(
        "system {}: {} zones, Vou={:.0} Ev={:.2} Vot={:.0} altitude={:.3}",
        system.id,
        zones.len(),
        vou,
        ev,
        vot,
        altitude_factor
    );

    SystemVentilationResult {
        system_id: system.id.clone(),
        system_name: system.name.clone(),
        system_type: system.system_type,
        total_area,
        total_occupancy,
        diversity_factor: diversity,
        diversified_occupancy: round_to(total_occupancy * diversity, 6).ceil(),
        vou: round_cfm(vou),
        max_zp: round_to(max_zp, 2),
        ev: round_to(ev, 2),
        vot: round_cfm(vot),
        altitude_correction_factor: round_to(altitude_factor, 3),
        total_exhaust: zones.iter().map(|z| z.exhaust).sum(),
        total_supply: zones.iter().map(|z| z.supply).sum(),
        design,
        effective_cooling_db: round_to(effective_cooling_db, 1),
        effective_cooling_wb: round_to(effective_cooling_wb, 1),
        effective_heating_db: round_to(effective_heating_db, 1),
        erv_savings_cfm: round_cfm(erv_savings_cfm),
        loads,
        zones,
    }
}
