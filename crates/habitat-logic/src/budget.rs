//! Area budget: livable area each crew member needs.
//!
//! A duration tier sets the base allowance, then the shell material
//! scales it. Material keywords are matched by substring against the
//! label and only the first matching keyword applies, so a label that
//! names two materials gets the earlier multiplier.

use crate::params::MissionParameters;

/// Base allowance for missions longer than this many days.
pub const LONG_MISSION_DAYS: u32 = 180;
/// Missions shorter than this many days get the short-stay allowance.
pub const SHORT_MISSION_DAYS: u32 = 30;

const LONG_TIER_M2: f64 = 25.0;
const MEDIUM_TIER_M2: f64 = 30.0;
const SHORT_TIER_M2: f64 = 12.0;

// Checked in order; first hit wins.
const MATERIAL_MULTIPLIERS: [(&str, f64); 3] =
    [("Inflatable", 1.2), ("Hybrid", 1.1), ("Regolith", 1.3)];

/// Base area per crew member for a mission duration, before material.
pub fn duration_tier(mission_days: u32) -> f64 {
    if mission_days > LONG_MISSION_DAYS {
        LONG_TIER_M2
    } else if mission_days >= SHORT_MISSION_DAYS {
        MEDIUM_TIER_M2
    } else {
        SHORT_TIER_M2
    }
}

/// Multiplier for a material label. Unknown materials get 1.0.
pub fn material_multiplier(material_label: &str) -> f64 {
    MATERIAL_MULTIPLIERS
        .iter()
        .find(|(keyword, _)| material_label.contains(keyword))
        .map_or(1.0, |&(_, multiplier)| multiplier)
}

/// Area per crew member in m².
pub fn area_per_crew(mission_days: u32, material_label: &str) -> f64 {
    duration_tier(mission_days) * material_multiplier(material_label)
}

/// Total budgeted area for the whole crew in m².
pub fn total_area(params: &MissionParameters) -> f64 {
    area_per_crew(params.mission_days, params.habitat_material.label()) * params.crew_size as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::HabitatMaterial;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn long_missions_get_25() {
        for days in [181, 200, 365, 1200] {
            assert_eq!(duration_tier(days), 25.0, "days={days}");
        }
    }

    #[test]
    fn medium_missions_get_30_inclusive() {
        for days in [30, 60, 90, 180] {
            assert_eq!(duration_tier(days), 30.0, "days={days}");
        }
    }

    #[test]
    fn short_missions_get_12() {
        for days in [0, 1, 3, 29] {
            assert_eq!(duration_tier(days), 12.0, "days={days}");
        }
    }

    #[test]
    fn material_multipliers() {
        assert!(approx(material_multiplier("Inflatable Softgoods"), 1.2));
        assert!(approx(material_multiplier("Hybrid"), 1.1));
        assert!(approx(material_multiplier("In-Situ Regolith"), 1.3));
        assert!(approx(material_multiplier("Metallic Hard Shell"), 1.0));
        assert!(approx(material_multiplier(""), 1.0));
    }

    #[test]
    fn substring_match_not_exact() {
        assert!(approx(material_multiplier("Next-gen Inflatable Module"), 1.2));
        assert!(approx(material_multiplier("Sintered Regolith Bricks"), 1.3));
    }

    #[test]
    fn first_matching_keyword_wins() {
        // Inflatable is checked before Hybrid, so this gets 1.2 only once.
        assert!(approx(material_multiplier("Hybrid Inflatable"), 1.2));
        assert!(approx(material_multiplier("Hybrid Regolith"), 1.1));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(approx(material_multiplier("inflatable"), 1.0));
    }

    #[test]
    fn total_area_scales_with_crew() {
        let params = MissionParameters {
            crew_size: 4,
            mission_days: 30,
            habitat_material: HabitatMaterial::MetallicHardShell,
            ..MissionParameters::default()
        };
        assert!(approx(total_area(&params), 120.0));

        let inflatable = MissionParameters {
            crew_size: 2,
            mission_days: 10,
            habitat_material: HabitatMaterial::InflatableSoftgoods,
            ..MissionParameters::default()
        };
        assert!(approx(total_area(&inflatable), 12.0 * 1.2 * 2.0));
    }
}
