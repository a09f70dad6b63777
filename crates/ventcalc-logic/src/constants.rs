//! Calculation constants: fallback values and air-side factors.
//!
//! Every default the pipeline falls back to lives here under a name, so the
//! permissive-default behavior can be asserted directly in tests and
//! referenced by report collaborators.

/// Values used when an input is missing or unknown.
pub mod fallback {
    /// People outdoor-air rate for an unknown space type (CFM/person).
    pub const RP: f64 = 5.0;
    /// Area outdoor-air rate for an unknown space type (CFM/ft²).
    pub const RA: f64 = 0.06;
    /// Default occupant density for an unknown space type (#/1000 ft²).
    pub const OCCUPANT_DENSITY: f64 = 5.0;

    /// Zone air-distribution effectiveness for spaces outside any zone.
    pub const EZ: f64 = 1.0;

    /// Cooling design dry bulb when no location is set (°F).
    pub const COOLING_DRY_BULB: f64 = 95.0;
    /// Cooling design mean-coincident wet bulb when no location is set (°F).
    pub const COOLING_WET_BULB: f64 = 75.0;
    /// Heating design dry bulb when no location is set (°F).
    pub const HEATING_DRY_BULB: f64 = 10.0;

    /// Occupants served per plumbing fixture when fixture counts are absent.
    pub const OCCUPANTS_PER_FIXTURE: f64 = 10.0;
}

/// Air-side heat transfer factors at standard air (BTU/h per CFM).
pub mod air {
    /// Sensible factor: 60 min/h × 0.075 lb/ft³ × 0.24 BTU/lb·°F.
    pub const SENSIBLE_FACTOR: f64 = 1.08;
    /// Total (enthalpy) factor: 60 min/h × 0.075 lb/ft³.
    pub const TOTAL_FACTOR: f64 = 4.5;
    /// Minutes per hour, for ACH → CFM.
    pub const MINUTES_PER_HOUR: f64 = 60.0;
}

/// Indoor reference state for the cooling enthalpy difference.
pub mod indoor_reference {
    /// Indoor dry bulb (°F).
    pub const DRY_BULB: f64 = 75.0;
    /// Indoor humidity ratio (lb water / lb dry air).
    pub const HUMIDITY_RATIO: f64 = 0.009;
    /// Indoor wet bulb used as the ERV latent-recovery target (°F).
    pub const ERV_WET_BULB: f64 = 65.0;
}

/// Multi-zone system ventilation efficiency (simplified Table 6-3).
pub mod efficiency {
    /// Floor on the worst-case zone primary outdoor-air fraction.
    pub const MIN_ZP: f64 = 0.5;
    /// Derating applied to `1 / max_zp`.
    pub const VAV_DERATE: f64 = 0.85;
    /// Lowest Ev ever reported for a VAV system.
    pub const MIN_EV: f64 = 0.6;
}

/// Altitude correction thresholds.
pub mod altitude {
    /// Elevation above which density correction applies (ft).
    pub const THRESHOLD_FT: f64 = 2000.0;
    /// Elevations above this are evaluated as if at this height.
    pub const MAX_ELEVATION_FT: f64 = 30_000.0;
}
