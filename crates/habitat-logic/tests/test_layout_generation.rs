//! Integration tests for the full layout generation pipeline.
//!
//! Exercises: MissionParameters → area budget → module selection →
//! sizing → floor-plan packing → LayoutResult (+ metrics).
//!
//! All tests are pure logic with no process or files.

use std::collections::HashSet;
use std::f64::consts::PI;

use habitat_logic::budget::{area_per_crew, duration_tier, total_area};
use habitat_logic::catalog::names;
use habitat_logic::layout::{generate_layout, generate_layout_from_raw, LayoutResult};
use habitat_logic::metrics::{check_volume, compute_metrics};
use habitat_logic::packing::{self, pack_floor_plan, placed_count};
use habitat_logic::params::{HabitatMaterial, Location, MissionParameters, MissionType};
use habitat_logic::schema::validate_parameters;
use habitat_logic::sizing::{round2, size_modules};
use serde_json::json;

// ── Helpers ────────────────────────────────────────────────────────────

fn params(
    crew_size: u32,
    mission_days: u32,
    mission_type: MissionType,
    habitat_material: HabitatMaterial,
) -> MissionParameters {
    MissionParameters {
        location: Location::LunarSurface,
        crew_size,
        mission_days,
        mission_type,
        habitat_material,
        ..MissionParameters::default()
    }
}

fn sweep() -> Vec<MissionParameters> {
    let mut all = Vec::new();
    for crew in [2, 3, 4, 5, 6, 8] {
        for days in [1, 3, 29, 30, 60, 180, 181, 365, 1200] {
            for mission_type in MissionType::KNOWN {
                for material in HabitatMaterial::KNOWN {
                    all.push(params(crew, days, mission_type.clone(), material));
                }
            }
        }
    }
    all
}

fn module_set(layout: &LayoutResult) -> HashSet<&str> {
    layout.modules.iter().map(String::as_str).collect()
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn scenario_a_short_exploration() {
    let p = params(4, 30, MissionType::Exploration, HabitatMaterial::MetallicHardShell);
    assert_eq!(area_per_crew(p.mission_days, p.habitat_material.label()), 30.0);
    assert_eq!(total_area(&p), 120.0);
    assert_eq!(packing::layer_count(&p), 1);

    let layout = generate_layout(&p);
    let expected: HashSet<&str> = [
        names::PRIVATE_QUARTERS,
        names::WASHROOM,
        names::WASTE_HUMAN,
        names::WASTE_TRASH,
        names::GYM,
        names::HABITATION,
        names::STORAGE,
        names::AIRLOCK,
    ]
    .into_iter()
    .collect();
    assert_eq!(module_set(&layout), expected);
    assert_eq!(layout.layer_count(), 1);

    let radius = (120.0 / PI).sqrt();
    assert!((layout.floor_plan[0].radius_m - radius).abs() < 1e-12);
}

#[test]
fn scenario_b_long_science_large_crew() {
    let p = params(6, 200, MissionType::ScienceResearch, HabitatMaterial::MetallicHardShell);
    assert_eq!(duration_tier(p.mission_days), 25.0);

    let layout = generate_layout(&p);
    let set = module_set(&layout);
    assert!(set.contains(names::LABORATORY));
    assert!(set.contains(names::GREENHOUSE));
    assert!(set.contains(names::MEDICAL_BAY));
    assert!(!set.contains(names::AIRLOCK));
    assert_eq!(layout.layer_count(), 2);
    assert_eq!(layout.floor_plan[0].entries.len(), 5);
    assert_eq!(layout.floor_plan[1].entries.len(), 5);
}

#[test]
fn scenario_c_single_module_layer() {
    let modules = vec![names::GYM.to_string()];
    let sizes = size_modules(&modules, 30.0);
    let plan = pack_floor_plan(&modules, &sizes, 30.0, 1);

    let entry = &plan[0].entries[0];
    assert_eq!(entry.angle_deg, 0.0);
    let expected = plan[0].radius_m - (5.0 / PI).sqrt();
    assert!((entry.distance_from_center_m - expected).abs() < 1e-12);
}

#[test]
fn scenario_d_habitation_share_is_fixed() {
    for p in sweep() {
        let layout = generate_layout(&p);
        let expected = round2(total_area(&p) * 0.35);
        assert_eq!(
            layout.module_sizes[names::HABITATION].area_m2,
            expected,
            "crew={} days={} material={}",
            p.crew_size,
            p.mission_days,
            p.habitat_material.label()
        );
    }
}

// ── Properties ─────────────────────────────────────────────────────────

#[test]
fn module_sizes_keys_match_modules() {
    for p in sweep() {
        let layout = generate_layout(&p);
        let keys: HashSet<&str> = layout.module_sizes.keys().map(String::as_str).collect();
        assert_eq!(keys, module_set(&layout));
    }
}

#[test]
fn every_module_placed_exactly_once() {
    for p in sweep() {
        let layout = generate_layout(&p);
        assert_eq!(placed_count(&layout.floor_plan), layout.modules.len());

        let mut seen = HashSet::new();
        for layer in &layout.floor_plan {
            for entry in &layer.entries {
                assert!(seen.insert(entry.module_name.as_str()), "duplicate {}", entry.module_name);
                assert!(layout.module_sizes.contains_key(&entry.module_name));
            }
        }
    }
}

#[test]
fn layer_count_policy_holds() {
    for p in sweep() {
        let expected = if p.crew_size > 4 || p.mission_days > 180 { 2 } else { 1 };
        assert_eq!(generate_layout(&p).layer_count(), expected);
    }
}

#[test]
fn angles_evenly_spaced_from_zero() {
    for p in sweep() {
        let layout = generate_layout(&p);
        for layer in &layout.floor_plan {
            let n = layer.entries.len();
            for (i, entry) in layer.entries.iter().enumerate() {
                let expected = i as f64 * 360.0 / n as f64;
                assert!((entry.angle_deg - expected).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn distance_is_layer_radius_minus_module_radius() {
    for p in sweep() {
        let layout = generate_layout(&p);
        for layer in &layout.floor_plan {
            for entry in &layer.entries {
                let module_radius = (entry.size.area_m2 / PI).sqrt();
                assert!((entry.distance_from_center_m - (layer.radius_m - module_radius)).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn inflatable_multiplier_applied_once() {
    for days in [10, 90, 400] {
        let metallic = area_per_crew(days, "Metallic Hard Shell");
        let inflatable = area_per_crew(days, "Inflatable Softgoods");
        assert!((inflatable - metallic * 1.2).abs() < 1e-9);
    }
}

#[test]
fn deterministic_output() {
    for p in sweep().into_iter().step_by(7) {
        assert_eq!(generate_layout(&p), generate_layout(&p));
    }
}

#[test]
fn habitation_volume_keeps_catalog_value() {
    let layout = generate_layout(&params(6, 400, MissionType::Exploration, HabitatMaterial::InSituRegolith));
    assert_eq!(layout.module_sizes[names::HABITATION].volume_m3, 48.0);
}

#[test]
fn bounds_violations_match_negative_distances() {
    // A crew of zero budgets no area, so every module with a footprint
    // overhangs its layer.
    let layout = generate_layout(&params(0, 30, MissionType::Exploration, HabitatMaterial::MetallicHardShell));
    assert_eq!(layout.floor_plan[0].radius_m, 0.0);

    let negative = layout
        .floor_plan
        .iter()
        .flat_map(|l| l.entries.iter())
        .filter(|e| e.distance_from_center_m < 0.0)
        .count();
    assert_eq!(negative, layout.modules.len() - 1, "all but the empty habitation");

    let metrics = compute_metrics(&layout);
    let bounds: Vec<_> = metrics
        .violations
        .iter()
        .filter(|v| v.kind == habitat_logic::metrics::ViolationKind::Bounds)
        .collect();
    assert_eq!(bounds.len(), negative);
    assert!(bounds.iter().all(|v| v.severity == 1.0));
}

#[test]
fn roomy_layout_has_no_bounds_violations() {
    let layout = generate_layout(&params(2, 3, MissionType::Exploration, HabitatMaterial::MetallicHardShell));
    assert!(layout
        .floor_plan
        .iter()
        .flat_map(|l| l.entries.iter())
        .all(|e| e.distance_from_center_m >= 0.0));
    let metrics = compute_metrics(&layout);
    assert!(metrics
        .violations
        .iter()
        .all(|v| v.kind != habitat_logic::metrics::ViolationKind::Bounds));
}

// ── Input handling ─────────────────────────────────────────────────────

#[test]
fn validated_raw_input_generates() {
    let raw = json!({
        "habitat": {
            "location": "Mars Transit Habitat",
            "crew_size": 6,
            "mission_days": 1200,
            "mission_type": "Science & Research",
            "deployment_vehicle": "SLS",
            "habitat_material": "Inflatable Softgoods"
        }
    });
    validate_parameters(&raw).unwrap();
    let layout = generate_layout_from_raw(&raw).unwrap();
    assert!(layout.description.contains("Location: Mars Transit Habitat"));
    assert!(layout.description.contains("Area per crew member: 30.00 m²"));
    assert_eq!(layout.layer_count(), 2);
}

#[test]
fn generator_tolerates_input_the_schema_rejects() {
    let raw = json!({ "crew_size": 1, "habitat_material": "Balsa" });
    assert!(validate_parameters(&raw).is_err());
    let layout = generate_layout_from_raw(&raw).unwrap();
    assert_eq!(layout.modules.len(), 8);
}

#[test]
fn crew_volume_rule_over_sweep() {
    for p in sweep() {
        let metrics = compute_metrics(&generate_layout(&p));
        let check = check_volume(p.crew_size, metrics.total_volume_m3);
        assert_eq!(
            check.is_pass(),
            metrics.total_volume_m3 >= p.crew_size as f64 * 5.0
        );
    }
}
