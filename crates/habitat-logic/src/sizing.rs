//! Module sizing: footprint and volume for each selected module.
//!
//! Sizes come straight from catalog dimensions, rounded to centimeter
//! precision. The Habitation module is then rescaled to take a fixed
//! share of the total area budget. Only its area is rescaled; its
//! volume and catalog dimensions keep their catalog-derived values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{module_dimensions, names};

/// Share of the total area budget given to the Habitation module.
pub const HABITATION_SHARE: f64 = 0.35;

/// Derived size of one module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSize {
    pub area_m2: f64,
    pub volume_m3: f64,
    pub width_m: f64,
    pub depth_m: f64,
    pub height_m: f64,
}

impl ModuleSize {
    /// Size straight from catalog dimensions.
    pub fn from_catalog(type_name: &str) -> Self {
        let (width_m, depth_m, height_m) = module_dimensions(type_name);
        Self {
            area_m2: round2(width_m * depth_m),
            volume_m3: round2(width_m * depth_m * height_m),
            width_m,
            depth_m,
            height_m,
        }
    }

    /// Radius of a circle with this module's floor area.
    pub fn equivalent_radius(&self) -> f64 {
        (self.area_m2.max(0.0) / std::f64::consts::PI).sqrt()
    }
}

/// Round to two decimal places, halves away from zero.
///
/// Python's `round(x, 2)` sends exact ties to the even neighbour instead.
/// The two only differ on values whose scaled form is an exact `.5`,
/// such as 0.125 or 0.375.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Area the Habitation module is given for a total budget.
pub fn habitation_area(total_area: f64) -> f64 {
    round2(total_area * HABITATION_SHARE)
}

/// Size every module, then apply the Habitation override.
pub fn size_modules(modules: &[String], total_area: f64) -> BTreeMap<String, ModuleSize> {
    let mut sizes: BTreeMap<String, ModuleSize> = modules
        .iter()
        .map(|name| (name.clone(), ModuleSize::from_catalog(name)))
        .collect();

    if let Some(habitation) = sizes.get_mut(names::HABITATION) {
        habitation.area_m2 = habitation_area(total_area);
    }

    sizes
}

/// Sum of module volumes in m³.
pub fn total_volume(sizes: &BTreeMap<String, ModuleSize>) -> f64 {
    sizes.values().map(|s| s.volume_m3).sum()
}
