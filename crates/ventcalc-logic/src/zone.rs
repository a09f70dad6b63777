//! Zone aggregator: sums member spaces and finds the critical space.

use serde::Serialize;

use crate::model::{Space, Zone};
use crate::space::{calculate_space_ventilation, SpaceVentilationResult};

/// Aggregated airflows for one zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneVentilationResult {
    pub zone_id: String,
    pub zone_name: String,
    pub system_id: Option<String>,
    pub ez: f64,
    pub total_area: f64,
    pub total_occupancy: f64,
    pub vbz: f64,
    pub voz: f64,
    pub exhaust: f64,
    pub supply: f64,
    /// Largest member-space Voz (the critical space).
    pub primary_voz: f64,
    /// Primary outdoor-air fraction.
    pub zp: f64,
    pub spaces: Vec<SpaceVentilationResult>,
}

/// Calculate a zone from the spaces assigned to it.
///
/// `all_spaces` may contain spaces from any zone; only members are used.
/// An empty zone produces zero totals.
pub fn calculate_zone_ventilation(zone: &Zone, all_spaces: &[Space]) -> ZoneVentilationResult {
    let spaces: Vec<SpaceVentilationResult> = all_spaces
        .iter()
        .filter(|s| s.zone_id.as_deref() == Some(zone.id.as_str()))
        .map(|s| calculate_space_ventilation(s, zone.ez))
        .collect();

    let sum = |field: fn(&SpaceVentilationResult) -> f64| spaces.iter().map(field).sum::<f64>();
    let voz = sum(|s| s.voz);
    let primary_voz = spaces.iter().map(|s| s.voz).fold(0.0, f64::max);

    ZoneVentilationResult {
        zone_id: zone.id.clone(),
        zone_name: zone.name.clone(),
        system_id: zone.system_id.clone(),
        ez: zone.ez,
        total_area: sum(|s| s.area),
        total_occupancy: sum(|s| s.occupancy),
        vbz: sum(|s| s.vbz),
        voz,
        exhaust: sum(|s| s.exhaust),
        supply: sum(|s| s.supply),
        primary_voz,
        zp: primary_outdoor_air_fraction(primary_voz, voz, zone.primary_airflow),
        spaces,
    }
}

/// Zone primary outdoor-air fraction Zp.
///
/// Without a primary airflow the zone is treated as all outdoor air
/// (Zp = 1.0) whenever it needs any ventilation at all.
pub fn primary_outdoor_air_fraction(primary_voz: f64, voz: f64, primary_airflow: Option<f64>) -> f64 {
    if primary_voz <= 0.0 {
        return 0.0;
    }
    match primary_airflow {
        Some(vpz) if vpz > 0.0 => voz / vpz,
        _ => 1.0,
    }
}
