//! Radial floor-plan packing.
//!
//! The habitat cross-section is split into `layer_count` concentric
//! layers that share the total area budget equally, so every layer has
//! the same radius. Modules are dealt out to layers in contiguous
//! chunks, keeping their selection order, and spaced evenly around each
//! layer starting at 0°.
//!
//! ```text
//!              90°
//!               │   ● module 1
//!        ●      │
//!   180° ───────┼─────── ● 0°  module 0
//!               │
//!        ●      │      ●
//!              270°
//! ```
//!
//! A module sits `layer_radius − module_radius` from the axis, where
//! `module_radius` is the radius of a circle with the module's floor
//! area. Modules larger than the layer get a negative distance; the
//! packer reports that as-is rather than clamping it.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::budget::LONG_MISSION_DAYS;
use crate::params::MissionParameters;
use crate::selection::MEDICAL_BAY_CREW_THRESHOLD;
use crate::sizing::ModuleSize;

/// One placed module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanEntry {
    #[serde(rename = "module")]
    pub module_name: String,
    /// Angular position in [0, 360).
    pub angle_deg: f64,
    /// May be negative when the module footprint exceeds the layer.
    pub distance_from_center_m: f64,
    pub size: ModuleSize,
}

/// One concentric layer of the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// 1-based layer index.
    #[serde(rename = "layer")]
    pub index: u32,
    pub radius_m: f64,
    #[serde(rename = "modules")]
    pub entries: Vec<FloorPlanEntry>,
}

/// Number of layers for a mission: two for large crews or long stays.
pub fn layer_count(params: &MissionParameters) -> u32 {
    if params.crew_size > MEDICAL_BAY_CREW_THRESHOLD || params.mission_days > LONG_MISSION_DAYS {
        2
    } else {
        1
    }
}

/// Radius shared by every layer.
pub fn layer_radius(total_area: f64, layer_count: u32) -> f64 {
    let layer_area = total_area / layer_count.max(1) as f64;
    (layer_area.max(0.0) / PI).sqrt()
}

/// Modules assigned to each full layer.
pub fn modules_per_layer(module_count: usize, layer_count: u32) -> usize {
    module_count.div_ceil(layer_count.max(1) as usize)
}

/// Place modules on `layer_count` layers.
///
/// Always returns exactly `layer_count` layers (at least one). Trailing
/// layers may be short or empty. A module missing from `sizes` is placed
/// with zero footprint.
pub fn pack_floor_plan(
    modules: &[String],
    sizes: &BTreeMap<String, ModuleSize>,
    total_area: f64,
    layer_count: u32,
) -> Vec<Layer> {
    let layer_count = layer_count.max(1);
    let radius_m = layer_radius(total_area, layer_count);
    let per_layer = modules_per_layer(modules.len(), layer_count);

    (0..layer_count)
        .map(|layer_idx| {
            let start = (layer_idx as usize * per_layer).min(modules.len());
            let end = (start + per_layer).min(modules.len());
            let chunk = &modules[start..end];

            Layer {
                index: layer_idx + 1,
                radius_m,
                entries: place_ring(chunk, sizes, radius_m),
            }
        })
        .collect()
}

fn place_ring(
    chunk: &[String],
    sizes: &BTreeMap<String, ModuleSize>,
    radius_m: f64,
) -> Vec<FloorPlanEntry> {
    if chunk.is_empty() {
        return Vec::new();
    }
    let angle_step = 360.0 / chunk.len() as f64;

    chunk
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let size = sizes.get(name).cloned().unwrap_or(ModuleSize {
                area_m2: 0.0,
                volume_m3: 0.0,
                width_m: 0.0,
                depth_m: 0.0,
                height_m: 0.0,
            });
            FloorPlanEntry {
                module_name: name.clone(),
                angle_deg: i as f64 * angle_step,
                distance_from_center_m: radius_m - size.equivalent_radius(),
                size,
            }
        })
        .collect()
}

/// Total number of placed modules across all layers.
pub fn placed_count(floor_plan: &[Layer]) -> usize {
    floor_plan.iter().map(|l| l.entries.len()).sum()
}
