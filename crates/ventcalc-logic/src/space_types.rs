//! Space-type reference table.
//!
//! Outdoor-air rates and default occupant densities follow ASHRAE 62.1
//! Table 6-1, exhaust metadata follows Table 6-4, and healthcare rooms carry
//! the ASHRAE 170 minimum air-change rates. The table is static data; the
//! pipeline only ever reads it.

use serde::Serialize;

/// Broad grouping of space types for pickers and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpaceCategory {
    Office,
    Education,
    FoodService,
    Retail,
    Assembly,
    Lodging,
    Healthcare,
    Support,
    /// Rooms sized by exhaust rather than outdoor air (toilets, closets).
    ExhaustOnly,
}

/// Exhaust requirement metadata for a space type.
///
/// A type may be area-based, fixture-based, or both; the larger governs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExhaustRate {
    /// Area-based exhaust (CFM/ft²).
    pub cfm_per_sf: Option<f64>,
    /// Continuous exhaust per plumbing fixture (CFM/fixture).
    pub cfm_per_fixture: Option<f64>,
    /// Upper end of the per-fixture range (intermittent operation).
    pub cfm_per_fixture_max: Option<f64>,
    /// Minimum exhaust for the room regardless of size (CFM).
    pub min_cfm_per_room: Option<f64>,
}

impl ExhaustRate {
    const fn per_area(cfm_per_sf: f64) -> Self {
        Self {
            cfm_per_sf: Some(cfm_per_sf),
            cfm_per_fixture: None,
            cfm_per_fixture_max: None,
            min_cfm_per_room: None,
        }
    }

    const fn per_fixture(low: f64, high: f64, room_min: Option<f64>) -> Self {
        Self {
            cfm_per_sf: None,
            cfm_per_fixture: Some(low),
            cfm_per_fixture_max: Some(high),
            min_cfm_per_room: room_min,
        }
    }

    /// Code exhaust for a room: the larger of the area-based and
    /// fixture-based rates, never below the per-room minimum.
    pub fn required_cfm(&self, area: f64, fixtures: f64) -> f64 {
        let by_area = self.cfm_per_sf.map_or(0.0, |rate| rate * area);
        let by_fixture = self.cfm_per_fixture.map_or(0.0, |rate| rate * fixtures);
        by_area
            .max(by_fixture)
            .max(self.min_cfm_per_room.unwrap_or(0.0))
    }
}

/// ASHRAE 170 minimum air changes for a healthcare room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AchMinimums {
    /// Minimum outdoor air changes per hour.
    pub outdoor_ach: f64,
    /// Minimum total (supply) air changes per hour.
    pub total_ach: f64,
}

/// One row of the space-type table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpaceType {
    pub id: &'static str,
    pub name: &'static str,
    pub category: SpaceCategory,
    /// People outdoor-air rate (CFM/person).
    pub rp: f64,
    /// Area outdoor-air rate (CFM/ft²).
    pub ra: f64,
    /// Default occupant density (#/1000 ft²).
    pub occupant_density: f64,
    pub exhaust: Option<ExhaustRate>,
    pub ach: Option<AchMinimums>,
}

const fn row(
    id: &'static str,
    name: &'static str,
    category: SpaceCategory,
    rp: f64,
    ra: f64,
    occupant_density: f64,
) -> SpaceType {
    SpaceType {
        id,
        name,
        category,
        rp,
        ra,
        occupant_density,
        exhaust: None,
        ach: None,
    }
}

const fn with_exhaust(mut space_type: SpaceType, exhaust: ExhaustRate) -> SpaceType {
    space_type.exhaust = Some(exhaust);
    space_type
}

const fn with_ach(mut space_type: SpaceType, outdoor_ach: f64, total_ach: f64) -> SpaceType {
    space_type.ach = Some(AchMinimums {
        outdoor_ach,
        total_ach,
    });
    space_type
}

use SpaceCategory::*;

/// All known space types.
pub static SPACE_TYPES: &[SpaceType] = &[
    // ── Office ────────────────────────────────────────────────
    row("office_space", "Office Space", Office, 5.0, 0.06, 5.0),
    row("reception_area", "Reception Area", Office, 5.0, 0.06, 30.0),
    row("conference_room", "Conference/Meeting", Office, 5.0, 0.06, 50.0),
    row("break_room", "Break Room", Office, 5.0, 0.06, 25.0),
    row("main_lobby", "Main Entry Lobby", Office, 5.0, 0.06, 10.0),
    with_exhaust(
        row("copy_room", "Copy/Printing Room", Office, 5.0, 0.06, 4.0),
        ExhaustRate::per_area(0.5),
    ),
    with_exhaust(
        row("kitchenette", "Kitchenette", Office, 5.0, 0.06, 25.0),
        ExhaustRate::per_area(0.3),
    ),
    // ── Education ─────────────────────────────────────────────
    row("classroom_5_8", "Classroom (ages 5-8)", Education, 10.0, 0.12, 25.0),
    row("classroom_9_plus", "Classroom (age 9 plus)", Education, 10.0, 0.12, 35.0),
    row("lecture_classroom", "Lecture Classroom", Education, 7.5, 0.06, 65.0),
    row("computer_lab", "Computer Lab", Education, 10.0, 0.12, 25.0),
    with_exhaust(
        row("science_lab", "Science Laboratory", Education, 10.0, 0.18, 25.0),
        ExhaustRate::per_area(1.0),
    ),
    row("library", "Library", Education, 5.0, 0.12, 10.0),
    // ── Food service ──────────────────────────────────────────
    row("restaurant_dining", "Restaurant Dining Room", FoodService, 7.5, 0.18, 70.0),
    row("cafeteria", "Cafeteria/Fast-Food Dining", FoodService, 7.5, 0.18, 100.0),
    with_exhaust(
        row("kitchen_commercial", "Kitchen (cooking)", FoodService, 7.5, 0.12, 20.0),
        ExhaustRate::per_area(0.7),
    ),
    // ── Retail / assembly / lodging ───────────────────────────
    row("retail_sales", "Sales Floor", Retail, 7.5, 0.12, 15.0),
    row("auditorium", "Auditorium Seating", Assembly, 5.0, 0.06, 150.0),
    row("health_club", "Health Club/Aerobics", Assembly, 20.0, 0.06, 40.0),
    row("hotel_bedroom", "Hotel Bedroom", Lodging, 5.0, 0.06, 10.0),
    // ── Healthcare (ASHRAE 170 minimums) ──────────────────────
    with_ach(
        row("patient_room", "Patient Room", Healthcare, 5.0, 0.06, 10.0),
        2.0,
        4.0,
    ),
    with_ach(
        row("exam_room", "Examination Room", Healthcare, 5.0, 0.06, 20.0),
        2.0,
        4.0,
    ),
    with_ach(
        row("procedure_room", "Procedure Room", Healthcare, 5.0, 0.06, 20.0),
        3.0,
        15.0,
    ),
    with_ach(
        row("operating_room", "Operating Room", Healthcare, 5.0, 0.06, 20.0),
        4.0,
        20.0,
    ),
    with_ach(
        row("icu_room", "Critical and Intensive Care", Healthcare, 5.0, 0.06, 10.0),
        2.0,
        6.0,
    ),
    with_ach(
        row("aii_room", "Airborne Infection Isolation Room", Healthcare, 5.0, 0.06, 10.0),
        2.0,
        12.0,
    ),
    with_ach(
        with_exhaust(
            row("soiled_workroom", "Soiled Workroom", Healthcare, 0.0, 0.12, 0.0),
            ExhaustRate::per_area(0.5),
        ),
        2.0,
        10.0,
    ),
    with_ach(
        row("clean_workroom", "Clean Workroom", Healthcare, 0.0, 0.12, 0.0),
        0.0,
        4.0,
    ),
    // ── Support ───────────────────────────────────────────────
    row("corridor", "Corridor", Support, 0.0, 0.06, 0.0),
    row("storage_room", "Storage Room", Support, 0.0, 0.12, 0.0),
    row("warehouse", "Warehouse", Support, 10.0, 0.06, 0.0),
    row("electrical_room", "Electrical Equipment Room", Support, 0.0, 0.06, 0.0),
    with_exhaust(
        row("chemical_storage", "Chemical Storage", Support, 0.0, 0.0, 0.0),
        ExhaustRate::per_area(1.5),
    ),
    with_exhaust(
        row("parking_garage", "Parking Garage", Support, 0.0, 0.0, 0.0),
        ExhaustRate::per_area(0.75),
    ),
    // ── Exhaust-driven rooms ──────────────────────────────────
    with_exhaust(
        row("toilet_public", "Toilet (public)", ExhaustOnly, 0.0, 0.0, 0.0),
        ExhaustRate::per_fixture(50.0, 70.0, None),
    ),
    with_exhaust(
        row("toilet_private", "Toilet (private)", ExhaustOnly, 0.0, 0.0, 0.0),
        ExhaustRate::per_fixture(25.0, 50.0, Some(25.0)),
    ),
    with_exhaust(
        row("shower_room", "Shower Room", ExhaustOnly, 0.0, 0.0, 0.0),
        ExhaustRate::per_fixture(20.0, 50.0, None),
    ),
    with_exhaust(
        row("janitor_closet", "Janitor Closet", ExhaustOnly, 0.0, 0.0, 0.0),
        ExhaustRate::per_area(1.0),
    ),
    with_exhaust(
        row("locker_room", "Locker/Dressing Room", ExhaustOnly, 0.0, 0.0, 0.0),
        ExhaustRate::per_area(0.5),
    ),
];

/// Look up a space type by identifier.
pub fn find(id: &str) -> Option<&'static SpaceType> {
    SPACE_TYPES.iter().find(|t| t.id == id)
}

/// All space types in a category, in table order.
pub fn by_category(category: SpaceCategory) -> impl Iterator<Item = &'static SpaceType> {
    SPACE_TYPES.iter().filter(move |t| t.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = SPACE_TYPES.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), SPACE_TYPES.len());
    }

    #[test]
    fn test_office_matches_table_6_1() {
        let office = find("office_space").expect("office_space in table");
        assert_eq!(office.rp, 5.0);
        assert_eq!(office.ra, 0.06);
        assert_eq!(office.occupant_density, 5.0);
        assert!(office.exhaust.is_none());
    }

    #[test]
    fn test_unknown_type_not_found() {
        assert!(find("submarine_galley").is_none());
    }

    #[test]
    fn test_rates_are_non_negative() {
        for t in SPACE_TYPES {
            assert!(t.rp >= 0.0 && t.ra >= 0.0, "{} has negative rate", t.id);
            assert!(t.occupant_density >= 0.0, "{} has negative density", t.id);
        }
    }

    #[test]
    fn test_healthcare_types_carry_ach() {
        for t in by_category(SpaceCategory::Healthcare) {
            let ach = t.ach.expect("healthcare rooms have ASHRAE 170 minimums");
            assert!(ach.total_ach >= ach.outdoor_ach, "{}", t.id);
        }
    }

    #[test]
    fn test_fixture_exhaust_uses_larger_basis() {
        let toilet = find("toilet_private").and_then(|t| t.exhaust).unwrap();
        // Per-room minimum governs for zero fixtures
        assert_eq!(toilet.required_cfm(40.0, 0.0), 25.0);
        assert_eq!(toilet.required_cfm(40.0, 2.0), 50.0);
    }

    #[test]
    fn test_area_exhaust() {
        let closet = find("janitor_closet").and_then(|t| t.exhaust).unwrap();
        assert_eq!(closet.required_cfm(60.0, 3.0), 60.0);
    }
}
