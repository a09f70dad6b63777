//! Project aggregator: every system plus the spaces no system serves.
//!
//! A space counts as served when its zone belongs to one of the project's
//! systems. Everything else is evaluated on its own with Ez = 1.0 and no
//! diversity or Ev adjustment.
//!
//! Project totals add each system's Vot to each unassigned space's Voz.
//! The two are not the same quantity (Voz has no system correction), but
//! reports built on earlier versions of this calculation expect the mixed
//! total, so it is kept and the unassigned share is reported separately.

use std::collections::HashSet;

use log::debug;
use serde::Serialize;

use crate::constants::fallback;
use crate::model::{AirSystem, ProjectSettings, Space, Zone};
use crate::space::{calculate_space_ventilation, SpaceVentilationResult};
use crate::system::{calculate_system_ventilation, SystemVentilationResult};

/// Grand totals across the project (CFM, BTU/h).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProjectTotals {
    /// Σ system Vot + Σ unassigned-space Voz.
    pub outdoor_air: f64,
    /// Portion of `outdoor_air` contributed by unassigned spaces.
    pub unassigned_outdoor_air: f64,
    pub exhaust: f64,
    pub supply: f64,
    pub cooling_sensible: f64,
    pub cooling_latent: f64,
    pub cooling_total: f64,
    pub heating_sensible: f64,
    pub area: f64,
    pub occupancy: f64,
}

/// Results for a whole project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectVentilationResult {
    pub systems: Vec<SystemVentilationResult>,
    pub unassigned_spaces: Vec<SpaceVentilationResult>,
    pub totals: ProjectTotals,
}

impl ProjectVentilationResult {
    /// Find a space result by id, wherever it landed.
    pub fn space(&self, space_id: &str) -> Option<&SpaceVentilationResult> {
        self.all_spaces().find(|s| s.space_id == space_id)
    }

    /// Iterate every space result, served spaces first.
    pub fn all_spaces(&self) -> impl Iterator<Item = &SpaceVentilationResult> {
        self.systems
            .iter()
            .flat_map(|sys| sys.zones.iter())
            .flat_map(|z| z.spaces.iter())
            .chain(self.unassigned_spaces.iter())
    }
}

/// Ids of zones assigned to a system that exists in `systems`.
pub fn served_zone_ids<'a>(zones: &'a [Zone], systems: &[AirSystem]) -> HashSet<&'a str> {
    let system_ids: HashSet<&str> = systems.iter().map(|s| s.id.as_str()).collect();
    zones
        .iter()
        .filter(|z| {
            z.system_id
                .as_deref()
                .is_some_and(|id| system_ids.contains(id))
        })
        .map(|z| z.id.as_str())
        .collect()
}

/// Calculate every system and every unassigned space in a project.
pub fn calculate_project_ventilation(
    spaces: &[Space],
    zones: &[Zone],
    systems: &[AirSystem],
    settings: &ProjectSettings,
) -> ProjectVentilationResult {
    let system_results: Vec<SystemVentilationResult> = systems
        .iter()
        .map(|sys| calculate_system_ventilation(sys, zones, spaces, settings))
        .collect();

    let served = served_zone_ids(zones, systems);
    let unassigned_spaces: Vec<SpaceVentilationResult> = spaces
        .iter()
        .filter(|s| {
            !s.zone_id
                .as_deref()
                .is_some_and(|zone_id| served.contains(zone_id))
        })
        .map(|s| calculate_space_ventilation(s, fallback::EZ))
        .collect();

    let mut totals = ProjectTotals::default();
    for sys in &system_results {
        totals.outdoor_air += sys.vot;
        totals.exhaust += sys.total_exhaust;
        totals.supply += sys.total_supply;
        totals.cooling_sensible += sys.loads.cooling_sensible;
        totals.cooling_latent += sys.loads.cooling_latent;
        totals.cooling_total += sys.loads.cooling_total;
        totals.heating_sensible += sys.loads.heating_sensible;
        totals.area += sys.total_area;
        totals.occupancy += sys.total_occupancy;
    }
    for space in &unassigned_spaces {
        totals.outdoor_air += space.voz;
        totals.unassigned_outdoor_air += space.voz;
        totals.exhaust += space.exhaust;
        totals.supply += space.supply;
        totals.area += space.area;
        totals.occupancy += space.occupancy;
    }

    debug!(
        "project: {} systems, {} unassigned spaces, outdoor air {:.0} CFM",
        system_results.len(),
        unassigned_spaces.len(),
        totals.outdoor_air
    );

    ProjectVentilationResult {
        systems: system_results,
        unassigned_spaces,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SystemType;

    fn office(id: &str, zone: Option<&str>) -> Space {
        let mut s = Space::new(id, id, 1000.0, 10.0, "office_space");
        s.zone_id = zone.map(str::to_string);
        s
    }

    fn zone(id: &str, system: Option<&str>, ez: f64) -> Zone {
        let mut z = Zone::new(id, id);
        z.system_id = system.map(str::to_string);
        z.ez = ez;
        z
    }

    #[test]
    fn test_empty_project() {
        let r = calculate_project_ventilation(&[], &[], &[], &ProjectSettings::default());
        assert!(r.systems.is_empty());
        assert!(r.unassigned_spaces.is_empty());
        assert_eq!(r.totals, ProjectTotals::default());
    }

    #[test]
    fn test_unassigned_classification() {
        let spaces = vec![
            office("served", Some("z1")),
            office("orphan_zone", Some("z2")),
            office("no_zone", None),
            office("dangling", Some("missing")),
            office("ghost_system", Some("z3")),
        ];
        let zones = vec![
            zone("z1", Some("ahu1"), 1.0),
            zone("z2", None, 0.8),
            zone("z3", Some("ahu_deleted"), 1.0),
        ];
        let systems = vec![AirSystem::new("ahu1", "AHU-1", SystemType::SingleZone)];
        let r = calculate_project_ventilation(&spaces, &zones, &systems, &ProjectSettings::default());

        let unassigned: Vec<&str> = r.unassigned_spaces.iter().map(|s| s.space_id.as_str()).collect();
        assert_eq!(unassigned, vec!["orphan_zone", "no_zone", "dangling", "ghost_system"]);
        // Zone Ez is not applied to spaces outside a system
        assert!(r.unassigned_spaces.iter().all(|s| s.ez == 1.0 && s.voz == 85.0));
    }

    #[test]
    fn test_totals_mix_vot_and_unassigned_voz() {
        let spaces = vec![office("a", Some("z1")), office("b", None)];
        let zones = vec![zone("z1", Some("ahu1"), 1.0)];
        let mut system = AirSystem::new("ahu1", "AHU-1", SystemType::VavMultiZone);
        system.occupancy_diversity = 1.0;
        let r = calculate_project_ventilation(&spaces, &zones, &[system], &ProjectSettings::default());

        // VAV with Zp = 1.0 → Ev = 0.85 → Vot = 85 / 0.85
        assert_eq!(r.systems[0].vot, 100.0);
        assert_eq!(r.totals.unassigned_outdoor_air, 85.0);
        assert_eq!(r.totals.outdoor_air, 185.0);
        assert_eq!(r.totals.area, 2000.0);
        assert_eq!(r.totals.cooling_sensible, r.systems[0].loads.cooling_sensible);
    }

    #[test]
    fn test_space_lookup() {
        let spaces = vec![office("a", Some("z1")), office("b", None)];
        let zones = vec![zone("z1", Some("ahu1"), 1.0)];
        let systems = vec![AirSystem::new("ahu1", "AHU-1", SystemType::SingleZone)];
        let r = calculate_project_ventilation(&spaces, &zones, &systems, &ProjectSettings::default());
        assert!(r.space("a").is_some());
        assert!(r.space("b").is_some());
        assert!(r.space("c").is_none());
        assert_eq!(r.all_spaces().count(), 2);
    }
}
