//! Input sanity checks for the editing UI.
//!
//! The pipeline accepts anything and degrades to defaults; this module is
//! how a form layer finds out which of those defaults it is relying on.
//! Nothing in the calculation calls it.

use std::collections::HashSet;

use crate::climate;
use crate::model::{ProjectSettings, ProjectSnapshot};
use crate::space_types;

/// A problem found in a project snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum InputIssue {
    /// Space area is zero or negative.
    NonPositiveArea { space_id: String },
    /// Space ceiling height is zero or negative.
    NonPositiveCeilingHeight { space_id: String },
    /// Space type is not in the reference table.
    UnknownSpaceType { space_id: String, space_type: String },
    /// Space references a zone that does not exist.
    UnknownZone { space_id: String, zone_id: String },
    /// Zone effectiveness is zero or negative.
    NonPositiveEz { zone_id: String },
    /// Zone references a system that does not exist.
    UnknownSystem { zone_id: String, system_id: String },
    /// Diversity factor outside (0, 1].
    DiversityOutOfRange { system_id: String, value: f64 },
    /// ERV efficiency outside [0, 1].
    ErvEfficiencyOutOfRange { system_id: String, value: f64 },
    /// Location id is not in the climate table.
    UnknownLocation(String),
    /// Indoor relative humidity outside [0, 100].
    HumidityOutOfRange(f64),
    /// Two entities of the same kind share an id.
    DuplicateId(String),
}

impl std::fmt::Display for InputIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputIssue::NonPositiveArea { space_id } => {
                write!(f, "space {}: area must be positive", space_id)
            }
            InputIssue::NonPositiveCeilingHeight { space_id } => {
                write!(f, "space {}: ceiling height must be positive", space_id)
            }
            InputIssue::UnknownSpaceType {
                space_id,
                space_type,
            } => write!(f, "space {}: unknown space type '{}'", space_id, space_type),
            InputIssue::UnknownZone { space_id, zone_id } => {
                write!(f, "space {}: zone '{}' does not exist", space_id, zone_id)
            }
            InputIssue::NonPositiveEz { zone_id } => {
                write!(f, "zone {}: Ez must be positive", zone_id)
            }
            InputIssue::UnknownSystem { zone_id, system_id } => {
                write!(f, "zone {}: system '{}' does not exist", zone_id, system_id)
            }
            InputIssue::DiversityOutOfRange { system_id, value } => {
                write!(f, "system {}: diversity {} outside 0–1", system_id, value)
            }
            InputIssue::ErvEfficiencyOutOfRange { system_id, value } => {
                write!(f, "system {}: ERV efficiency {} outside 0–1", system_id, value)
            }
            InputIssue::UnknownLocation(id) => write!(f, "unknown location '{}'", id),
            InputIssue::HumidityOutOfRange(rh) => {
                write!(f, "indoor relative humidity {}% outside 0–100", rh)
            }
            InputIssue::DuplicateId(id) => write!(f, "duplicate id '{}'", id),
        }
    }
}

impl std::error::Error for InputIssue {}

/// Validate project settings on their own.
pub fn validate_settings(settings: &ProjectSettings) -> Vec<InputIssue> {
    let mut issues = Vec::new();

    if settings.custom_conditions.is_none() {
        if let Some(id) = &settings.location_id {
            if climate::find_location(id).is_none() {
                issues.push(InputIssue::UnknownLocation(id.clone()));
            }
        }
    }
    for rh in [settings.indoor_summer_rh, settings.indoor_winter_rh] {
        if !(0.0..=100.0).contains(&rh) {
            issues.push(InputIssue::HumidityOutOfRange(rh));
        }
    }

    issues
}

/// Validate a whole snapshot, returning every issue found.
pub fn validate_snapshot(snapshot: &ProjectSnapshot) -> Vec<InputIssue> {
    let mut issues = validate_settings(&snapshot.settings);

    let zone_ids: HashSet<&str> = snapshot.zones.iter().map(|z| z.id.as_str()).collect();
    let system_ids: HashSet<&str> = snapshot.systems.iter().map(|s| s.id.as_str()).collect();

    issues.extend(duplicates(snapshot.spaces.iter().map(|s| s.id.as_str())));
    issues.extend(duplicates(snapshot.zones.iter().map(|z| z.id.as_str())));
    issues.extend(duplicates(snapshot.systems.iter().map(|s| s.id.as_str())));

    for space in &snapshot.spaces {
        if space.area <= 0.0 {
            issues.push(InputIssue::NonPositiveArea {
                space_id: space.id.clone(),
            });
        }
        if space.ceiling_height <= 0.0 {
            issues.push(InputIssue::NonPositiveCeilingHeight {
                space_id: space.id.clone(),
            });
        }
        if space_types::find(&space.space_type).is_none() {
            issues.push(InputIssue::UnknownSpaceType {
                space_id: space.id.clone(),
                space_type: space.space_type.clone(),
            });
        }
        if let Some(zone_id) = &space.zone_id {
            if !zone_ids.contains(zone_id.as_str()) {
                issues.push(InputIssue::UnknownZone {
                    space_id: space.id.clone(),
                    zone_id: zone_id.clone(),
                });
            }
        }
    }

    for zone in &snapshot.zones {
        if zone.ez <= 0.0 {
            issues.push(InputIssue::NonPositiveEz {
                zone_id: zone.id.clone(),
            });
        }
        if let Some(system_id) = &zone.system_id {
            if !system_ids.contains(system_id.as_str()) {
                issues.push(InputIssue::UnknownSystem {
                    zone_id: zone.id.clone(),
                    system_id: system_id.clone(),
                });
            }
        }
    }

    for system in &snapshot.systems {
        let d = system.occupancy_diversity;
        if d <= 0.0 || d > 1.0 {
            issues.push(InputIssue::DiversityOutOfRange {
                system_id: system.id.clone(),
                value: d,
            });
        }
        for value in [system.erv_sensible_efficiency, system.erv_latent_efficiency] {
            if !(0.0..=1.0).contains(&value) {
                issues.push(InputIssue::ErvEfficiencyOutOfRange {
                    system_id: system.id.clone(),
                    value,
                });
            }
        }
    }

    issues
}

fn duplicates<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<InputIssue> {
    let mut seen = HashSet::new();
    ids.filter(|id| !seen.insert(*id))
        .map(|id| InputIssue::DuplicateId(id.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AirSystem, Space, SystemType, Zone};

    fn valid_snapshot() -> ProjectSnapshot {
        let mut space = Space::new("s1", "Office", 1000.0, 10.0, "office_space");
        space.zone_id = Some("z1".into());
        let mut zone = Zone::new("z1", "Zone 1");
        zone.system_id = Some("ahu1".into());
        ProjectSnapshot {
            settings: ProjectSettings {
                location_id: Some("boston_ma".into()),
                ..Default::default()
            },
            spaces: vec![space],
            zones: vec![zone],
            systems: vec![AirSystem::new("ahu1", "AHU-1", SystemType::SingleZone)],
        }
    }

    #[test]
    fn test_valid_snapshot_has_no_issues() {
        assert!(validate_snapshot(&valid_snapshot()).is_empty());
    }

    #[test]
    fn test_bad_space_fields() {
        let mut snapshot = valid_snapshot();
        snapshot.spaces[0].area = 0.0;
        snapshot.spaces[0].ceiling_height = -1.0;
        snapshot.spaces[0].space_type = "moon_base".into();
        snapshot.spaces[0].zone_id = Some("z9".into());
        let issues = validate_snapshot(&snapshot);
        assert_eq!(issues.len(), 4);
        assert!(issues.contains(&InputIssue::UnknownZone {
            space_id: "s1".into(),
            zone_id: "z9".into()
        }));
    }

    #[test]
    fn test_bad_zone_and_system_fields() {
        let mut snapshot = valid_snapshot();
        snapshot.zones[0].ez = 0.0;
        snapshot.zones[0].system_id = Some("ahu2".into());
        snapshot.systems[0].occupancy_diversity = 1.2;
        snapshot.systems[0].erv_sensible_efficiency = 1.5;
        let issues = validate_snapshot(&snapshot);
        assert!(issues.contains(&InputIssue::NonPositiveEz { zone_id: "z1".into() }));
        assert!(issues.contains(&InputIssue::UnknownSystem {
            zone_id: "z1".into(),
            system_id: "ahu2".into()
        }));
        assert!(issues.contains(&InputIssue::DiversityOutOfRange {
            system_id: "ahu1".into(),
            value: 1.2
        }));
        assert!(issues.contains(&InputIssue::ErvEfficiencyOutOfRange {
            system_id: "ahu1".into(),
            value: 1.5
        }));
    }

    #[test]
    fn test_settings_issues() {
        let settings = ProjectSettings {
            location_id: Some("gotham".into()),
            indoor_summer_rh: 120.0,
            ..Default::default()
        };
        let issues = validate_settings(&settings);
        assert_eq!(
            issues,
            vec![
                InputIssue::UnknownLocation("gotham".into()),
                InputIssue::HumidityOutOfRange(120.0)
            ]
        );
        assert_eq!(issues[0].to_string(), "unknown location 'gotham'");
    }

    #[test]
    fn test_duplicate_ids() {
        let mut snapshot = valid_snapshot();
        let copy = snapshot.spaces[0].clone();
        snapshot.spaces.push(copy);
        assert_eq!(
            validate_snapshot(&snapshot),
            vec![InputIssue::DuplicateId("s1".into())]
        );
    }
}
