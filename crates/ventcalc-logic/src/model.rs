//! Input entities: spaces, zones, air systems, and project settings.
//!
//! These are plain snapshots handed in by the project store. The pipeline
//! borrows them and never mutates, creates, or deletes entities.
//!
//! ```
//! use ventcalc_logic::model::ProjectSnapshot;
//!
//! let json = r#"{
//!     "spaces": [{ "id": "s1", "name": "Open Office", "area": 1000.0,
//!                  "ceiling_height": 10.0, "space_type": "office_space" }]
//! }"#;
//! let snapshot = ProjectSnapshot::from_json(json).unwrap();
//! let result = snapshot.calculate();
//! assert_eq!(result.unassigned_spaces[0].voz, 85.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::climate::{CoolingCondition, DesignConditions, HeatingCondition};
use crate::project::{calculate_project_ventilation, ProjectVentilationResult};

/// A single room or area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: String,
    pub name: String,
    /// Floor area (ft²).
    pub area: f64,
    /// Ceiling height (ft).
    pub ceiling_height: f64,
    /// Identifier into the space-type table.
    pub space_type: String,
    #[serde(default)]
    pub occupancy_override: Option<f64>,
    #[serde(default)]
    pub rp_override: Option<f64>,
    #[serde(default)]
    pub ra_override: Option<f64>,
    /// Minimum outdoor air changes per hour.
    #[serde(default)]
    pub ventilation_ach: Option<f64>,
    #[serde(default)]
    pub exhaust_ach: Option<f64>,
    /// Supply air changes per hour; replaces the calculated supply outright.
    #[serde(default)]
    pub supply_ach: Option<f64>,
    /// Plumbing fixtures served by fixture-based exhaust.
    #[serde(default)]
    pub fixture_count: Option<u32>,
    #[serde(default)]
    pub zone_id: Option<String>,
}

impl Space {
    /// Create a space with no overrides and no zone assignment.
    pub fn new(id: &str, name: &str, area: f64, ceiling_height: f64, space_type: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            area,
            ceiling_height,
            space_type: space_type.to_string(),
            occupancy_override: None,
            rp_override: None,
            ra_override: None,
            ventilation_ach: None,
            exhaust_ach: None,
            supply_ach: None,
            fixture_count: None,
            zone_id: None,
        }
    }

    /// Room volume (ft³).
    pub fn volume(&self) -> f64 {
        self.area * self.ceiling_height
    }
}

/// A thermal zone grouping spaces served by one terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    /// Zone air-distribution effectiveness.
    #[serde(default = "default_ez")]
    pub ez: f64,
    /// Heating setpoint (°F), informational.
    #[serde(default = "default_heating_setpoint")]
    pub heating_setpoint: f64,
    /// Cooling setpoint (°F), informational.
    #[serde(default = "default_cooling_setpoint")]
    pub cooling_setpoint: f64,
    /// Design primary airflow Vpz (CFM), when known.
    #[serde(default)]
    pub primary_airflow: Option<f64>,
    #[serde(default)]
    pub system_id: Option<String>,
}

fn default_ez() -> f64 {
    1.0
}

fn default_heating_setpoint() -> f64 {
    70.0
}

fn default_cooling_setpoint() -> f64 {
    75.0
}

impl Zone {
    /// Create a zone with Ez = 1.0 and no system assignment.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            ez: default_ez(),
            heating_setpoint: default_heating_setpoint(),
            cooling_setpoint: default_cooling_setpoint(),
            primary_airflow: None,
            system_id: None,
        }
    }
}

/// Air-handling system configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemType {
    /// Single-zone constant or variable volume unit.
    #[default]
    SingleZone,
    /// Multi-zone recirculating VAV.
    VavMultiZone,
    /// 100% outdoor-air dedicated system.
    Doas,
}

/// An air-handling unit serving one or more zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirSystem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub system_type: SystemType,
    /// Whether an energy-recovery ventilator pre-treats outdoor air.
    #[serde(default)]
    pub erv_enabled: bool,
    /// ERV sensible effectiveness (0–1).
    #[serde(default)]
    pub erv_sensible_efficiency: f64,
    /// ERV latent effectiveness (0–1).
    #[serde(default)]
    pub erv_latent_efficiency: f64,
    /// Occupancy diversity factor D (0–1).
    #[serde(default = "default_diversity")]
    pub occupancy_diversity: f64,
}

fn default_diversity() -> f64 {
    1.0
}

impl AirSystem {
    /// Create a system with no ERV and diversity 1.0.
    pub fn new(id: &str, name: &str, system_type: SystemType) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            system_type,
            erv_enabled: false,
            erv_sensible_efficiency: 0.0,
            erv_latent_efficiency: 0.0,
            occupancy_diversity: default_diversity(),
        }
    }
}

/// Project-wide calculation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// Built-in location id (see [`crate::climate::LOCATIONS`]).
    pub location_id: Option<String>,
    /// Custom design conditions; takes precedence over `location_id`.
    pub custom_conditions: Option<DesignConditions>,
    pub cooling_condition: CoolingCondition,
    pub heating_condition: HeatingCondition,
    /// Indoor summer dry bulb (°F).
    pub indoor_summer_db: f64,
    /// Indoor summer relative humidity (%).
    pub indoor_summer_rh: f64,
    /// Indoor winter dry bulb (°F).
    pub indoor_winter_db: f64,
    /// Indoor winter relative humidity (%).
    pub indoor_winter_rh: f64,
    pub altitude_correction: bool,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            location_id: None,
            custom_conditions: None,
            cooling_condition: CoolingCondition::default(),
            heating_condition: HeatingCondition::default(),
            indoor_summer_db: 75.0,
            indoor_summer_rh: 50.0,
            indoor_winter_db: 70.0,
            indoor_winter_rh: 30.0,
            altitude_correction: false,
        }
    }
}

/// Everything the pipeline needs for one calculation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSnapshot {
    pub settings: ProjectSettings,
    pub spaces: Vec<Space>,
    pub zones: Vec<Zone>,
    pub systems: Vec<AirSystem>,
}

impl ProjectSnapshot {
    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a snapshot file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Run the full project pipeline over this snapshot.
    pub fn calculate(&self) -> ProjectVentilationResult {
        calculate_project_ventilation(&self.spaces, &self.zones, &self.systems, &self.settings)
    }
}

/// Errors that can occur while loading a snapshot
#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Json(e)
    }
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "IO error: {}", e),
            SnapshotError::Json(e) => write!(f, "Snapshot parse error: {}", e),
        }
    }
}

impl std::error::Error for SnapshotError {}
