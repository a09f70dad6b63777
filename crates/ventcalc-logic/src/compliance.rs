//! Code-vs-actual comparison for calculated spaces.
//!
//! Looks at a finished [`SpaceVentilationResult`] and reports where user
//! overrides put a space below its table requirement or where an alternate
//! basis (ACH, exhaust makeup) governs. Healthcare rooms are also checked
//! against their ASHRAE 170 air-change minimums, which the calculation
//! itself does not apply. Notes are advisory; the calculation never
//! changes because of them.

use serde::Serialize;

use crate::project::ProjectVentilationResult;
use crate::space::{ach_to_cfm, AirflowBasis, SpaceVentilationResult, SupplyBasis};
use crate::space_types;

/// One finding for a space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComplianceNote {
    /// Space type is not in the reference table; fallback rates were used.
    UnknownSpaceType { space_type: String },
    /// Rp override is lower than the table value.
    PeopleRateBelowCode { used: f64, code: f64 },
    /// Ra override is lower than the table value.
    AreaRateBelowCode { used: f64, code: f64 },
    /// Air-change requirement, not Rp/Ra, set Vbz.
    VentilationSetByAch { ach_cfm: f64, code_cfm: f64 },
    /// Exhaust makeup, not ventilation, set supply.
    SupplySetByExhaust { supply: f64, voz: f64 },
    /// Supply override delivers less than the zone outdoor air.
    SupplyBelowVentilation { supply: f64, voz: f64 },
    /// Supply override delivers less than the exhaust it must make up.
    SupplyBelowExhaust { supply: f64, exhaust: f64 },
    /// Vbz is below the ASHRAE 170 outdoor air-change minimum.
    VentilationBelowAchMinimum { vbz: f64, minimum: f64 },
    /// Supply is below the ASHRAE 170 total air-change minimum.
    SupplyBelowAchMinimum { supply: f64, minimum: f64 },
}

impl ComplianceNote {
    /// Whether the note describes a shortfall rather than information.
    pub fn is_deficiency(&self) -> bool {
        !matches!(
            self,
            ComplianceNote::VentilationSetByAch { .. } | ComplianceNote::SupplySetByExhaust { .. }
        )
    }
}

/// Notes for one space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpaceCompliance {
    pub space_id: String,
    pub space_name: String,
    pub notes: Vec<ComplianceNote>,
}

/// Compare one space result against its code basis.
pub fn check_space(result: &SpaceVentilationResult) -> Vec<ComplianceNote> {
    let mut notes = Vec::new();

    let Some(space_type) = space_types::find(&result.space_type) else {
        notes.push(ComplianceNote::UnknownSpaceType {
            space_type: result.space_type.clone(),
        });
        return notes;
    };

    if result.rp < space_type.rp {
        notes.push(ComplianceNote::PeopleRateBelowCode {
            used: result.rp,
            code: space_type.rp,
        });
    }
    if result.ra < space_type.ra {
        notes.push(ComplianceNote::AreaRateBelowCode {
            used: result.ra,
            code: space_type.ra,
        });
    }
    if result.ventilation_basis == AirflowBasis::Ach {
        notes.push(ComplianceNote::VentilationSetByAch {
            ach_cfm: result.vbz_ach,
            code_cfm: result.vbz_code,
        });
    }

    match result.supply_basis {
        SupplyBasis::Exhaust => notes.push(ComplianceNote::SupplySetByExhaust {
            supply: result.supply,
            voz: result.voz,
        }),
        SupplyBasis::AchOverride => {
            if result.supply < result.voz {
                notes.push(ComplianceNote::SupplyBelowVentilation {
                    supply: result.supply,
                    voz: result.voz,
                });
            }
            if result.supply < result.exhaust {
                notes.push(ComplianceNote::SupplyBelowExhaust {
                    supply: result.supply,
                    exhaust: result.exhaust,
                });
            }
        }
        SupplyBasis::Ventilation => {}
    }

    if let Some(ach) = space_type.ach {
        let outdoor_minimum = ach_to_cfm(ach.outdoor_ach, result.volume).round();
        if result.vbz < outdoor_minimum {
            notes.push(ComplianceNote::VentilationBelowAchMinimum {
                vbz: result.vbz,
                minimum: outdoor_minimum,
            });
        }
        let total_minimum = ach_to_cfm(ach.total_ach, result.volume).round();
        if result.supply < total_minimum {
            notes.push(ComplianceNote::SupplyBelowAchMinimum {
                supply: result.supply,
                minimum: total_minimum,
            });
        }
    }

    notes
}

/// Check every space in a project, keeping only spaces with notes.
pub fn check_project(result: &ProjectVentilationResult) -> Vec<SpaceCompliance> {
    result
        .all_spaces()
        .filter_map(|space| {
            let notes = check_space(space);
            (!notes.is_empty()).then(|| SpaceCompliance {
                space_id: space.space_id.clone(),
                space_name: space.space_name.clone(),
                notes,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Space;
    use crate::space::calculate_space_ventilation;

    #[test]
    fn test_default_office_is_clean() {
        let space = Space::new("s1", "Office", 1000.0, 10.0, "office_space");
        assert!(check_space(&calculate_space_ventilation(&space, 1.0)).is_empty());
    }

    #[test]
    fn test_unknown_type_reported() {
        let space = Space::new("s1", "Vault", 100.0, 10.0, "bank_vault");
        let notes = check_space(&calculate_space_ventilation(&space, 1.0));
        assert_eq!(
            notes,
            vec![ComplianceNote::UnknownSpaceType {
                space_type: "bank_vault".into()
            }]
        );
        assert!(notes[0].is_deficiency());
    }

    #[test]
    fn test_low_overrides_reported() {
        let mut space = Space::new("s1", "Office", 1000.0, 10.0, "office_space");
        space.rp_override = Some(2.5);
        space.ra_override = Some(0.03);
        let notes = check_space(&calculate_space_ventilation(&space, 1.0));
        assert!(notes.contains(&ComplianceNote::PeopleRateBelowCode { used: 2.5, code: 5.0 }));
        assert!(notes.contains(&ComplianceNote::AreaRateBelowCode { used: 0.03, code: 0.06 }));
    }

    #[test]
    fn test_ach_basis_is_informational() {
        let mut space = Space::new("s1", "Office", 1000.0, 10.0, "office_space");
        space.ventilation_ach = Some(1.0);
        let notes = check_space(&calculate_space_ventilation(&space, 1.0));
        assert_eq!(notes.len(), 1);
        assert!(!notes[0].is_deficiency());
    }

    #[test]
    fn test_healthcare_minimums_reported() {
        let space = Space::new("or1", "OR", 600.0, 10.0, "operating_room");
        let notes = check_space(&calculate_space_ventilation(&space, 1.0));
        // Code Vbz 96 against 4 ACH (400) outdoor and 20 ACH (2000) total on 6000 ft³
        assert_eq!(
            notes,
            vec![
                ComplianceNote::VentilationBelowAchMinimum {
                    vbz: 96.0,
                    minimum: 400.0
                },
                ComplianceNote::SupplyBelowAchMinimum {
                    supply: 96.0,
                    minimum: 2000.0
                },
            ]
        );
        assert!(notes.iter().all(ComplianceNote::is_deficiency));
    }

    #[test]
    fn test_healthcare_overrides_meeting_minimums_are_clean() {
        let mut space = Space::new("or1", "OR", 600.0, 10.0, "operating_room");
        space.ventilation_ach = Some(4.0);
        space.supply_ach = Some(20.0);
        let notes = check_space(&calculate_space_ventilation(&space, 1.0));
        assert_eq!(
            notes,
            vec![ComplianceNote::VentilationSetByAch {
                ach_cfm: 400.0,
                code_cfm: 96.0
            }]
        );
    }

    #[test]
    fn test_supply_override_shortfalls() {
        let mut space = Space::new("or1", "OR", 600.0, 10.0, "operating_room");
        space.ventilation_ach = Some(4.0);
        space.supply_ach = Some(3.0);
        let notes = check_space(&calculate_space_ventilation(&space, 1.0));
        // 300 CFM supply against 400 Voz and a 2000 CFM 20-ACH minimum
        assert!(notes.contains(&ComplianceNote::SupplyBelowVentilation {
            supply: 300.0,
            voz: 400.0
        }));
        assert!(notes.contains(&ComplianceNote::SupplyBelowAchMinimum {
            supply: 300.0,
            minimum: 2000.0
        }));
        assert!(!notes
            .iter()
            .any(|n| matches!(n, ComplianceNote::VentilationBelowAchMinimum { .. })));
    }
}
