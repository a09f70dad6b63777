//! VentCalc Headless Calculation Harness
//!
//! Validates the ventilation pipeline and reference tables end to end.
//! Runs entirely in-process with no project store and no UI.
//!
//! Usage:
//!   cargo run -p ventcalc-simtest
//!   cargo run -p ventcalc-simtest -- --verbose
//!   cargo run -p ventcalc-simtest -- --project path/to/snapshot.json

use std::collections::HashSet;

use log::{error, info, warn};
use serde::Serialize;
use ventcalc_logic::climate::{self, LOCATIONS};
use ventcalc_logic::compliance::{check_project, check_space, ComplianceNote, SpaceCompliance};
use ventcalc_logic::constants::fallback;
use ventcalc_logic::model::{AirSystem, ProjectSettings, ProjectSnapshot, Space, SystemType, Zone};
use ventcalc_logic::project::ProjectVentilationResult;
use ventcalc_logic::space::calculate_space_ventilation;
use ventcalc_logic::space_types::{SpaceCategory, SPACE_TYPES};
use ventcalc_logic::system::{calculate_system_ventilation, ventilation_loads};
use ventcalc_logic::validation::validate_snapshot;

// ── Sample project (same JSON the integration tests use) ────────────────
const SAMPLE_PROJECT_JSON: &str = include_str!("../../../data/sample_project.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

/// Report written by `--project`.
#[derive(Serialize)]
struct ProjectReport<'a> {
    result: &'a ProjectVentilationResult,
    compliance: Vec<SpaceCompliance>,
    input_issues: Vec<String>,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");

    env_logger::Builder::from_default_env()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    if let Some(pos) = args.iter().position(|a| a == "--project") {
        let Some(path) = args.get(pos + 1) else {
            error!("--project needs a snapshot path");
            std::process::exit(2);
        };
        std::process::exit(run_project(path));
    }

    println!("=== VentCalc Calculation Harness ===\n");

    let mut results = Vec::new();

    // 1. Reference tables
    results.extend(validate_reference_tables(verbose));

    // 2. Space calculations
    results.extend(validate_space_logic(verbose));

    // 3. System outdoor-air intake
    results.extend(validate_system_logic(verbose));

    // 4. Ventilation loads and ERV
    results.extend(validate_loads(verbose));

    // 5. Sample project end to end
    results.extend(validate_sample_project(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Calculate a snapshot file and print the JSON report. Returns the exit code.
fn run_project(path: &str) -> i32 {
    let snapshot = match ProjectSnapshot::load(path) {
        Ok(s) => s,
        Err(e) => {
            error!("{}: {}", path, e);
            return 1;
        }
    };
    info!(
        "loaded {}: {} spaces, {} zones, {} systems",
        path,
        snapshot.spaces.len(),
        snapshot.zones.len(),
        snapshot.systems.len()
    );

    let issues = validate_snapshot(&snapshot);
    for issue in &issues {
        warn!("{}", issue);
    }

    let result = snapshot.calculate();
    let report = ProjectReport {
        result: &result,
        compliance: check_project(&result),
        input_issues: issues.iter().map(ToString::to_string).collect(),
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            error!("failed to serialize report: {}", e);
            1
        }
    }
}

fn in_zone(mut space: Space, zone_id: &str) -> Space {
    space.zone_id = Some(zone_id.to_string());
    space
}

fn zone_on(id: &str, system_id: &str) -> Zone {
    let mut zone = Zone::new(id, id);
    zone.system_id = Some(system_id.to_string());
    zone
}

// ── 1. Reference Tables ─────────────────────────────────────────────────

fn validate_reference_tables(verbose: bool) -> Vec<TestResult> {
    println!("--- Reference Tables ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "space_types_not_empty".into(),
        passed: SPACE_TYPES.len() > 30,
        detail: format!("{} space types loaded", SPACE_TYPES.len()),
    });

    let mut seen = HashSet::new();
    let dupes: Vec<&str> = SPACE_TYPES
        .iter()
        .filter(|t| !seen.insert(t.id))
        .map(|t| t.id)
        .collect();
    results.push(TestResult {
        name: "space_types_unique_ids".into(),
        passed: dupes.is_empty(),
        detail: if dupes.is_empty() {
            "all space type ids unique".into()
        } else {
            format!("duplicate ids: {}", dupes.join(", "))
        },
    });

    let negative: Vec<&str> = SPACE_TYPES
        .iter()
        .filter(|t| t.rp < 0.0 || t.ra < 0.0 || t.occupant_density < 0.0)
        .map(|t| t.id)
        .collect();
    results.push(TestResult {
        name: "space_types_non_negative_rates".into(),
        passed: negative.is_empty(),
        detail: if negative.is_empty() {
            "all Rp, Ra, and densities non-negative".into()
        } else {
            format!("negative rates: {}", negative.join(", "))
        },
    });

    // Exhaust-only rooms get no outdoor air but must carry exhaust metadata
    let bad_exhaust: Vec<&str> = SPACE_TYPES
        .iter()
        .filter(|t| t.category == SpaceCategory::ExhaustOnly)
        .filter(|t| t.exhaust.is_none() || t.rp != 0.0 || t.ra != 0.0)
        .map(|t| t.id)
        .collect();
    results.push(TestResult {
        name: "space_types_exhaust_only".into(),
        passed: bad_exhaust.is_empty(),
        detail: if bad_exhaust.is_empty() {
            "exhaust-only rooms have exhaust rates and zero Rp/Ra".into()
        } else {
            format!("inconsistent: {}", bad_exhaust.join(", "))
        },
    });

    let bad_ach: Vec<&str> = SPACE_TYPES
        .iter()
        .filter_map(|t| t.ach.map(|a| (t.id, a)))
        .filter(|(_, a)| a.outdoor_ach > a.total_ach)
        .map(|(id, _)| id)
        .collect();
    results.push(TestResult {
        name: "space_types_ach_order".into(),
        passed: bad_ach.is_empty(),
        detail: if bad_ach.is_empty() {
            "outdoor ACH never exceeds total ACH".into()
        } else {
            format!("outdoor ACH above total: {}", bad_ach.join(", "))
        },
    });

    let bad_climate: Vec<&str> = LOCATIONS
        .iter()
        .filter(|l| {
            let c = &l.conditions;
            c.cooling_wb_04 > c.cooling_db_04
                || c.cooling_wb_1 > c.cooling_db_1
                || c.cooling_db_1 > c.cooling_db_04
                || c.heating_db_996 > c.heating_db_99
                || c.heating_db_99 >= c.cooling_db_1
        })
        .map(|l| l.id)
        .collect();
    results.push(TestResult {
        name: "climate_percentiles_ordered".into(),
        passed: bad_climate.is_empty(),
        detail: if bad_climate.is_empty() {
            format!("{} locations with consistent percentiles", LOCATIONS.len())
        } else {
            format!("inconsistent: {}", bad_climate.join(", "))
        },
    });

    if verbose {
        println!("  Locations:");
        for l in LOCATIONS {
            println!(
                "    {:16} {:>6.0} ft  altitude factor {:.3}",
                l.id,
                l.conditions.elevation_ft,
                climate::altitude_correction_factor(l.conditions.elevation_ft)
            );
        }
    }

    results
}

// ── 2. Space Calculations ───────────────────────────────────────────────

fn validate_space_logic(_verbose: bool) -> Vec<TestResult> {
    println!("--- Space Calculations ---");
    let mut results = Vec::new();

    let office = Space::new("s1", "Office", 1000.0, 10.0, "office_space");
    let r = calculate_space_ventilation(&office, 1.0);
    results.push(TestResult {
        name: "space_default_office".into(),
        passed: r.vbz == 85.0 && r.voz == 85.0,
        detail: format!("1000 ft² office: Vbz={} Voz={} (expect 85)", r.vbz, r.voz),
    });

    let mut ach_office = office.clone();
    ach_office.ventilation_ach = Some(1.0);
    let r = calculate_space_ventilation(&ach_office, 1.0);
    results.push(TestResult {
        name: "space_ach_floor".into(),
        passed: r.vbz == 167.0,
        detail: format!("1 ACH on 10,000 ft³: Vbz={} (expect 167)", r.vbz),
    });

    let r = calculate_space_ventilation(&office, 0.8);
    results.push(TestResult {
        name: "space_ez_applied".into(),
        passed: r.voz == 106.0,
        detail: format!("Ez=0.8: Voz={} (expect 106)", r.voz),
    });

    let unknown = Space::new("s2", "Mystery", 1000.0, 10.0, "not_a_type");
    let r = calculate_space_ventilation(&unknown, 1.0);
    let expected = fallback::RP * fallback::OCCUPANT_DENSITY + fallback::RA * 1000.0;
    results.push(TestResult {
        name: "space_unknown_type_fallback".into(),
        passed: r.vbz == expected.round(),
        detail: format!("unknown type: Vbz={} (expect {})", r.vbz, expected.round()),
    });

    let mut toilet = Space::new("t1", "Restroom", 200.0, 9.0, "toilet_public");
    toilet.fixture_count = Some(3);
    let r = calculate_space_ventilation(&toilet, 1.0);
    results.push(TestResult {
        name: "space_fixture_exhaust".into(),
        passed: r.exhaust == 150.0 && r.supply == 150.0,
        detail: format!("3 fixtures: exhaust={} supply={}", r.exhaust, r.supply),
    });

    // ASHRAE 170 minimums are reported, not applied
    let or = Space::new("or1", "OR 1", 600.0, 10.0, "operating_room");
    let r = calculate_space_ventilation(&or, 1.0);
    let notes = check_space(&r);
    let flagged = notes
        .iter()
        .filter(|n| {
            matches!(
                n,
                ComplianceNote::VentilationBelowAchMinimum { .. }
                    | ComplianceNote::SupplyBelowAchMinimum { .. }
            )
        })
        .count();
    results.push(TestResult {
        name: "space_healthcare_ach_advisory".into(),
        passed: r.vbz == 96.0 && r.supply == 96.0 && flagged == 2,
        detail: format!(
            "operating room: Vbz={} supply={} (expect 96, 96), {} ACH notes",
            r.vbz, r.supply, flagged
        ),
    });

    results
}

// ── 3. System Outdoor Air ───────────────────────────────────────────────

fn validate_system_logic(_verbose: bool) -> Vec<TestResult> {
    println!("--- System Outdoor Air ---");
    let mut results = Vec::new();
    let defaults = ProjectSettings::default();

    let single = AirSystem::new("rtu", "RTU", SystemType::SingleZone);
    let spaces = vec![in_zone(
        Space::new("s1", "Office", 1000.0, 10.0, "office_space"),
        "z1",
    )];
    let zones = vec![zone_on("z1", "rtu")];
    let r = calculate_system_ventilation(&single, &zones, &spaces, &defaults);
    results.push(TestResult {
        name: "system_single_zone".into(),
        passed: r.ev == 1.0 && r.vot == 85.0,
        detail: format!("Ev={} Vot={} (expect 1.0, 85)", r.ev, r.vot),
    });

    // Two zones at Voz 100 and 400 with 500 CFM primary air each
    let vav = AirSystem::new("ahu", "AHU", SystemType::VavMultiZone);
    let mut zones = vec![zone_on("z1", "ahu"), zone_on("z2", "ahu")];
    for z in &mut zones {
        z.primary_airflow = Some(500.0);
    }
    let spaces: Vec<Space> = [("s1", "z1", 1000.0), ("s2", "z2", 4000.0)]
        .iter()
        .map(|&(id, zone, area)| {
            let mut s = in_zone(Space::new(id, id, area, 10.0, "office_space"), zone);
            s.rp_override = Some(0.0);
            s.ra_override = Some(0.1);
            s
        })
        .collect();
    let r = calculate_system_ventilation(&vav, &zones, &spaces, &defaults);
    results.push(TestResult {
        name: "system_vav_efficiency".into(),
        passed: r.max_zp == 0.8 && r.ev == 0.85,
        detail: format!("max Zp={} Ev={} (expect 0.8, 0.85)", r.max_zp, r.ev),
    });

    let mut diverse = single.clone();
    diverse.occupancy_diversity = 0.6;
    let spaces = vec![in_zone(
        Space::new("s1", "Office", 1000.0, 10.0, "office_space"),
        "z1",
    )];
    let zones = vec![zone_on("z1", "rtu")];
    let r = calculate_system_ventilation(&diverse, &zones, &spaces, &defaults);
    results.push(TestResult {
        name: "system_diversity".into(),
        passed: r.vou == 75.0,
        detail: format!("D=0.6: Vou={} (expect 75)", r.vou),
    });

    let denver = ProjectSettings {
        location_id: Some("denver_co".into()),
        altitude_correction: true,
        ..Default::default()
    };
    let r = calculate_system_ventilation(&single, &zones, &spaces, &denver);
    results.push(TestResult {
        name: "system_altitude_denver".into(),
        passed: r.altitude_correction_factor < 0.85 && r.vot > 85.0,
        detail: format!(
            "factor={} Vot={}",
            r.altitude_correction_factor, r.vot
        ),
    });

    let empty = calculate_system_ventilation(&vav, &[], &[], &defaults);
    results.push(TestResult {
        name: "system_empty".into(),
        passed: empty.vot == 0.0 && empty.loads.cooling_total == 0.0,
        detail: "system with no zones has zero intake and loads".into(),
    });

    results
}

// ── 4. Loads & ERV ──────────────────────────────────────────────────────

fn validate_loads(_verbose: bool) -> Vec<TestResult> {
    println!("--- Ventilation Loads ---");
    let mut results = Vec::new();
    let defaults = ProjectSettings::default();

    let loads = ventilation_loads(
        85.0,
        fallback::COOLING_DRY_BULB,
        fallback::COOLING_WET_BULB,
        fallback::HEATING_DRY_BULB,
        &defaults,
    );
    results.push(TestResult {
        name: "loads_fallback_sensible".into(),
        passed: loads.cooling_sensible == 1836.0 && loads.heating_sensible == 5508.0,
        detail: format!(
            "cooling sensible={} heating={} (expect 1836, 5508)",
            loads.cooling_sensible, loads.heating_sensible
        ),
    });

    let consistent = loads.cooling_latent >= 0.0
        && loads.cooling_total >= loads.cooling_sensible
        && loads.cooling_latent == loads.cooling_total - loads.cooling_sensible;
    results.push(TestResult {
        name: "loads_latent_split".into(),
        passed: consistent,
        detail: format!(
            "total={} sensible={} latent={}",
            loads.cooling_total, loads.cooling_sensible, loads.cooling_latent
        ),
    });

    let mut plain = AirSystem::new("ahu", "AHU", SystemType::SingleZone);
    let spaces = vec![in_zone(
        Space::new("s1", "Office", 1000.0, 10.0, "office_space"),
        "z1",
    )];
    let zones = vec![zone_on("z1", "ahu")];
    let without = calculate_system_ventilation(&plain, &zones, &spaces, &defaults);
    plain.erv_enabled = true;
    plain.erv_sensible_efficiency = 0.75;
    plain.erv_latent_efficiency = 0.6;
    let with = calculate_system_ventilation(&plain, &zones, &spaces, &defaults);
    results.push(TestResult {
        name: "loads_erv_reduces".into(),
        passed: with.loads.cooling_total < without.loads.cooling_total
            && with.loads.heating_sensible < without.loads.heating_sensible
            && with.vot == without.vot,
        detail: format!(
            "cooling {} → {}, heating {} → {}, savings {} CFM",
            without.loads.cooling_total,
            with.loads.cooling_total,
            without.loads.heating_sensible,
            with.loads.heating_sensible,
            with.erv_savings_cfm
        ),
    });

    results
}

// ── 5. Sample Project ───────────────────────────────────────────────────

fn validate_sample_project(verbose: bool) -> Vec<TestResult> {
    println!("--- Sample Project ---");
    let mut results = Vec::new();

    let snapshot = match ProjectSnapshot::from_json(SAMPLE_PROJECT_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "sample_parse".into(),
                passed: false,
                detail: format!("{}", e),
            });
            return results;
        }
    };

    let issues = validate_snapshot(&snapshot);
    results.push(TestResult {
        name: "sample_valid".into(),
        passed: issues.is_empty(),
        detail: if issues.is_empty() {
            "no input issues".into()
        } else {
            issues
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        },
    });

    let result = snapshot.calculate();
    let served: usize = result
        .systems
        .iter()
        .flat_map(|s| s.zones.iter())
        .map(|z| z.spaces.len())
        .sum();
    results.push(TestResult {
        name: "sample_every_space_once".into(),
        passed: served + result.unassigned_spaces.len() == snapshot.spaces.len(),
        detail: format!(
            "{} served + {} unassigned of {} spaces",
            served,
            result.unassigned_spaces.len(),
            snapshot.spaces.len()
        ),
    });

    let system_vot: f64 = result.systems.iter().map(|s| s.vot).sum();
    let unassigned_voz: f64 = result.unassigned_spaces.iter().map(|s| s.voz).sum();
    results.push(TestResult {
        name: "sample_totals_balance".into(),
        passed: result.totals.outdoor_air == system_vot + unassigned_voz,
        detail: format!(
            "outdoor air {} = systems {} + unassigned {}",
            result.totals.outdoor_air, system_vot, unassigned_voz
        ),
    });

    let deficiencies = check_project(&result)
        .iter()
        .flat_map(|c| c.notes.iter())
        .filter(|n| n.is_deficiency())
        .count();
    results.push(TestResult {
        name: "sample_no_deficiencies".into(),
        passed: deficiencies == 0,
        detail: format!("{} deficiency notes", deficiencies),
    });

    results.push(TestResult {
        name: "sample_deterministic".into(),
        passed: snapshot.calculate() == result,
        detail: "repeat calculation matches".into(),
    });

    if verbose {
        println!("  Systems:");
        for s in &result.systems {
            println!(
                "    {:8} Vou={:>6} Ev={:.2} Vot={:>6} cooling={:>7} heating={:>7}",
                s.system_id, s.vou, s.ev, s.vot, s.loads.cooling_total, s.loads.heating_sensible
            );
        }
        println!(
            "  Project: OA={} CFM, unassigned={} CFM, area={} ft²",
            result.totals.outdoor_air, result.totals.unassigned_outdoor_air, result.totals.area
        );
    }

    results
}
