//! Pure ventilation calculation logic for VentCalc.
//!
//! This crate implements the ASHRAE 62.1 Ventilation Rate Procedure as a
//! four-stage aggregation: space → zone → system → project. Functions take
//! plain data snapshots and return immutable result structures, with no
//! database, UI, or shared state, so the whole pipeline can be re-run on
//! every edit.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`climate`] | Design-condition table, percentile selection, altitude density factor |
//! | [`compliance`] | Code-vs-actual notes for calculated spaces |
//! | [`constants`] | Named fallback values and air-side factors |
//! | [`model`] | Space, zone, air system, settings, and snapshot loading |
//! | [`project`] | Project totals and unassigned spaces |
//! | [`psychrometrics`] | Approximate humidity ratio and moist-air enthalpy |
//! | [`rounding`] | Whole-CFM and fixed-decimal rounding for results |
//! | [`space`] | Vbz, Voz, exhaust, and supply for one space |
//! | [`space_types`] | ASHRAE 62.1 / 170 space-type reference table |
//! | [`system`] | Vou, Ev, Vot, ERV pre-treatment, and ventilation loads |
//! | [`validation`] | Input sanity report for editing forms |
//! | [`zone`] | Zone sums, critical space, and primary OA fraction |

pub mod climate;
pub mod compliance;
pub mod constants;
pub mod model;
pub mod project;
pub mod psychrometrics;
pub mod rounding;
pub mod space;
pub mod space_types;
pub mod system;
pub mod validation;
pub mod zone;

pub use model::{AirSystem, ProjectSettings, ProjectSnapshot, Space, SystemType, Zone};
pub use project::{calculate_project_ventilation, ProjectVentilationResult};
pub use space::{calculate_space_ventilation, resolve_with_ach_floor, SpaceVentilationResult};
pub use system::{calculate_system_ventilation, SystemVentilationResult};
pub use zone::{calculate_zone_ventilation, ZoneVentilationResult};
