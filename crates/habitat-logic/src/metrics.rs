//! Layout metrics and rule checks.
//!
//! Read-only analysis of a generated layout: module counts by category,
//! per-layer statistics, and the deterministic checks a reviewer cares
//! about. Nothing here moves a module.
//!
//! # Checks
//!
//! - **Bounds**: a module whose distance from the axis is negative, i.e.
//!   its footprint does not fit inside its layer.
//! - **Clean/dirty adjacency**: a clean module next to a dirty one on the
//!   same ring.
//! - **Quiet/noisy adjacency**: a quiet module next to a noisy one.
//! - **Volume**: at least [`MIN_VOLUME_PER_CREW`] m³ of module volume per
//!   crew member.
//!
//! Ring neighbours are consecutive entries on a layer; the last entry
//! also neighbours the first when the layer holds more than two modules.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{module_category, ModuleCategory};
use crate::layout::LayoutResult;
use crate::packing::Layer;
use crate::sizing::total_volume;

/// Minimum pressurized module volume per crew member (m³).
pub const MIN_VOLUME_PER_CREW: f64 = 5.0;

const ADJACENCY_SEVERITY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Bounds,
    AdjacencyCleanDirty,
    AdjacencyQuietNoisy,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Bounds => "bounds",
            Self::AdjacencyCleanDirty => "clean/dirty adjacency",
            Self::AdjacencyQuietNoisy => "quiet/noisy adjacency",
        };
        f.write_str(label)
    }
}

/// One rule violation found in a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub layer: u32,
    pub modules: Vec<String>,
    pub description: String,
    /// 0.0 to 1.0.
    pub severity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KindSummary {
    pub count: u32,
    pub max_severity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViolationSummary {
    pub total_count: u32,
    pub max_severity: f64,
    pub total_severity: f64,
    pub by_kind: BTreeMap<ViolationKind, KindSummary>,
}

impl ViolationSummary {
    pub fn from_violations(violations: &[Violation]) -> Self {
        let mut summary = Self::default();
        for v in violations {
            summary.total_count += 1;
            summary.total_severity += v.severity;
            summary.max_severity = summary.max_severity.max(v.severity);
            let kind = summary.by_kind.entry(v.kind).or_default();
            kind.count += 1;
            kind.max_severity = kind.max_severity.max(v.severity);
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerMetrics {
    pub index: u32,
    pub radius_m: f64,
    pub module_count: usize,
    /// Sum of module floor areas on this layer.
    pub total_area_m2: f64,
    pub modules: Vec<String>,
}

/// Outcome of the crew volume rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum VolumeCheck {
    Pass,
    Warning {
        current_m3: f64,
        required_m3: f64,
        crew_size: u32,
    },
}

impl VolumeCheck {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn message(&self) -> String {
        match self {
            Self::Pass => "PASS: Volume is sufficient for current crew requirements.".to_string(),
            Self::Warning {
                current_m3,
                required_m3,
                crew_size,
            } => format!(
                "WARNING: Volume ({current_m3:.1} m³) is too small! Requires {required_m3:.1} m³ for {crew_size} crew."
            ),
        }
    }
}

/// Check total module volume against the per-crew minimum.
pub fn check_volume(crew_size: u32, total_volume_m3: f64) -> VolumeCheck {
    let required_m3 = crew_size as f64 * MIN_VOLUME_PER_CREW;
    if total_volume_m3 < required_m3 {
        VolumeCheck::Warning {
            current_m3: total_volume_m3,
            required_m3,
            crew_size,
        }
    } else {
        VolumeCheck::Pass
    }
}

/// Aggregate statistics for one layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub total_modules: usize,
    pub layer_count: usize,
    pub modules_by_category: BTreeMap<ModuleCategory, u32>,
    pub layers: Vec<LayerMetrics>,
    pub total_volume_m3: f64,
    pub violations: Vec<Violation>,
    pub violation_summary: ViolationSummary,
}

/// Compute metrics and rule violations for a layout.
pub fn compute_metrics(layout: &LayoutResult) -> LayoutMetrics {
    let mut modules_by_category: BTreeMap<ModuleCategory, u32> =
        ModuleCategory::ALL.iter().map(|&c| (c, 0)).collect();
    for name in &layout.modules {
        *modules_by_category.entry(module_category(name)).or_default() += 1;
    }

    let layers = layout
        .floor_plan
        .iter()
        .map(|layer| LayerMetrics {
            index: layer.index,
            radius_m: layer.radius_m,
            module_count: layer.entries.len(),
            total_area_m2: layer.entries.iter().map(|e| e.size.area_m2).sum(),
            modules: layer.entries.iter().map(|e| e.module_name.clone()).collect(),
        })
        .collect();

    let violations = find_violations(&layout.floor_plan);
    let violation_summary = ViolationSummary::from_violations(&violations);

    LayoutMetrics {
        total_modules: layout.modules.len(),
        layer_count: layout.floor_plan.len(),
        modules_by_category,
        layers,
        total_volume_m3: total_volume(&layout.module_sizes),
        violations,
        violation_summary,
    }
}

/// Bounds and adjacency violations across all layers.
pub fn find_violations(floor_plan: &[Layer]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for layer in floor_plan {
        for entry in &layer.entries {
            if entry.distance_from_center_m < 0.0 {
                let module_radius = entry.size.equivalent_radius();
                let severity = if module_radius > 0.0 {
                    (-entry.distance_from_center_m / module_radius).min(1.0)
                } else {
                    1.0
                };
                violations.push(Violation {
                    kind: ViolationKind::Bounds,
                    layer: layer.index,
                    modules: vec![entry.module_name.clone()],
                    description: format!(
                        "{} ({:.2} m²) does not fit inside layer {} (radius {:.2} m)",
                        entry.module_name, entry.size.area_m2, layer.index, layer.radius_m
                    ),
                    severity,
                });
            }
        }

        for (a, b) in ring_neighbours(layer.entries.len()) {
            let name_a = &layer.entries[a].module_name;
            let name_b = &layer.entries[b].module_name;
            if let Some(kind) = adjacency_conflict(module_category(name_a), module_category(name_b))
            {
                violations.push(Violation {
                    kind,
                    layer: layer.index,
                    modules: vec![name_a.clone(), name_b.clone()],
                    description: format!(
                        "{name_a} is next to {name_b} on layer {} ({kind})",
                        layer.index
                    ),
                    severity: ADJACENCY_SEVERITY,
                });
            }
        }
    }

    violations
}

fn ring_neighbours(n: usize) -> Vec<(usize, usize)> {
    let mut pairs: Vec<(usize, usize)> = (1..n).map(|i| (i - 1, i)).collect();
    if n > 2 {
        pairs.push((n - 1, 0));
    }
    pairs
}

fn adjacency_conflict(a: ModuleCategory, b: ModuleCategory) -> Option<ViolationKind> {
    use ModuleCategory::*;
    match (a, b) {
        (Clean, Dirty) | (Dirty, Clean) => Some(ViolationKind::AdjacencyCleanDirty),
        (Quiet, Noisy) | (Noisy, Quiet) => Some(ViolationKind::AdjacencyQuietNoisy),
        _ => None,
    }
}

impl LayoutMetrics {
    /// Human-readable overview.
    pub fn summary_text(&self) -> String {
        let mut text = String::new();
        text.push_str("Habitat Overview:\n");
        text.push_str(&format!("• Number of Layers: {}\n", self.layer_count));
        text.push_str(&format!("• Total Modules: {}\n", self.total_modules));
        text.push_str(&format!("• Total Module Volume: {:.1} m³\n", self.total_volume_m3));
        text.push('\n');
        text.push_str("Module Distribution:\n");
        for (category, count) in &self.modules_by_category {
            text.push_str(&format!("• {} Areas: {count}\n", category.label()));
        }
        text.push('\n');
        text.push_str("Layers:\n");
        for layer in &self.layers {
            text.push_str(&format!(
                "• Layer {} (r = {:.2} m): {} modules, {:.2} m²: {}\n",
                layer.index,
                layer.radius_m,
                layer.module_count,
                layer.total_area_m2,
                layer.modules.join(", ")
            ));
        }
        text.push('\n');
        text.push_str("Layout Issues:\n");
        text.push_str(&format!(
            "• Total Violations: {}\n",
            self.violation_summary.total_count
        ));
        text.push_str(&format!(
            "• Maximum Severity: {:.2}",
            self.violation_summary.max_severity
        ));
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::names;
    use crate::layout::generate_layout;
    use crate::packing::FloorPlanEntry;
    use crate::params::{MissionParameters, MissionType};
    use crate::sizing::ModuleSize;

    fn entry(name: &str, distance: f64) -> FloorPlanEntry {
        FloorPlanEntry {
            module_name: name.to_string(),
            angle_deg: 0.0,
            distance_from_center_m: distance,
            size: ModuleSize::from_catalog(name),
        }
    }

    fn layer(entries: Vec<FloorPlanEntry>) -> Layer {
        Layer {
            index: 1,
            radius_m: 5.0,
            entries,
        }
    }

    #[test]
    fn ring_neighbour_pairs() {
        assert!(ring_neighbours(0).is_empty());
        assert!(ring_neighbours(1).is_empty());
        assert_eq!(ring_neighbours(2), vec![(0, 1)]);
        assert_eq!(ring_neighbours(3), vec![(0, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn clean_next_to_dirty_is_flagged() {
        let plan = vec![layer(vec![
            entry(names::MEDICAL_BAY, 1.0),
            entry(names::WASHROOM, 1.0),
        ])];
        let violations = find_violations(&plan);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::AdjacencyCleanDirty);
        assert_eq!(violations[0].severity, 0.5);
    }

    #[test]
    fn quiet_next_to_noisy_wraps_around() {
        let plan = vec![layer(vec![
            entry(names::PRIVATE_QUARTERS, 1.0),
            entry(names::STORAGE, 1.0),
            entry(names::GYM, 1.0),
        ])];
        let violations = find_violations(&plan);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::AdjacencyQuietNoisy);
        assert_eq!(
            violations[0].modules,
            vec![names::GYM.to_string(), names::PRIVATE_QUARTERS.to_string()]
        );
    }

    #[test]
    fn negative_distance_is_bounds_violation() {
        let plan = vec![layer(vec![entry(names::STORAGE, -10.0)])];
        let violations = find_violations(&plan);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::Bounds);
        assert_eq!(violations[0].severity, 1.0);
    }

    #[test]
    fn volume_rule() {
        assert!(check_volume(4, 20.0).is_pass());
        let check = check_volume(6, 20.0);
        assert!(!check.is_pass());
        assert_eq!(
            check.message(),
            "WARNING: Volume (20.0 m³) is too small! Requires 30.0 m³ for 6 crew."
        );
        assert_eq!(
            check_volume(2, 10.0).message(),
            "PASS: Volume is sufficient for current crew requirements."
        );
    }

    #[test]
    fn metrics_for_generated_layout() {
        let params = MissionParameters {
            crew_size: 6,
            mission_days: 200,
            mission_type: MissionType::ScienceResearch,
            ..MissionParameters::default()
        };
        let layout = generate_layout(&params);
        let metrics = compute_metrics(&layout);

        assert_eq!(metrics.total_modules, 10);
        assert_eq!(metrics.layer_count, 2);
        assert_eq!(metrics.layers.iter().map(|l| l.module_count).sum::<usize>(), 10);
        assert_eq!(metrics.modules_by_category.values().sum::<u32>(), 10);
        assert_eq!(metrics.modules_by_category[&ModuleCategory::Dirty], 3);
        assert_eq!(
            metrics.violation_summary.total_count as usize,
            metrics.violations.len()
        );
        assert!(metrics.total_volume_m3 > 0.0);
    }

    #[test]
    fn summary_counts_by_kind() {
        let plan = vec![layer(vec![
            entry(names::GREENHOUSE, -1.0),
            entry(names::WASTE_HUMAN, 1.0),
        ])];
        let summary = ViolationSummary::from_violations(&find_violations(&plan));
        assert_eq!(summary.total_count, 2);
        assert_eq!(summary.by_kind[&ViolationKind::Bounds].count, 1);
        assert_eq!(summary.by_kind[&ViolationKind::AdjacencyCleanDirty].count, 1);
        assert!(summary.max_severity > 0.5);
    }

    #[test]
    fn summary_text_lists_sections() {
        let metrics = compute_metrics(&generate_layout(&MissionParameters::default()));
        let text = metrics.summary_text();
        assert!(text.starts_with("Habitat Overview:"));
        assert!(text.contains("• Total Modules: 8"));
        assert!(text.contains("• Dirty Areas: 3"));
        assert!(text.contains("Layout Issues:"));
    }
}
