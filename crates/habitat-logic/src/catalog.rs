//! Module catalog: minimum physical dimensions per module type.
//!
//! Static data, never mutated at runtime. Dimensions are in meters:
//! width and depth span the floor footprint, height is the clear
//! ceiling height. Each module also carries a [`ModuleCategory`] used
//! by the adjacency checks in [`crate::metrics`].

use serde::{Deserialize, Serialize};

/// Canonical module type names.
pub mod names {
    pub const PRIVATE_QUARTERS: &str = "Private Quarters";
    pub const WASHROOM: &str = "Washroom/Hygiene";
    pub const WASTE_HUMAN: &str = "Waste Management (Human)";
    pub const WASTE_TRASH: &str = "Waste Management (Trash)";
    pub const GYM: &str = "Gym";
    pub const HABITATION: &str = "Habitation";
    pub const LABORATORY: &str = "Laboratory";
    pub const AIRLOCK: &str = "Airlock";
    pub const STORAGE: &str = "Storage";
    pub const GREENHOUSE: &str = "Greenhouse";
    pub const MEDICAL_BAY: &str = "Medical Bay";
}

/// Environmental character of a module, for adjacency rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModuleCategory {
    /// Food, medical and plant spaces that must stay uncontaminated.
    Clean,
    /// Hygiene and waste handling.
    Dirty,
    /// Sleep and rest.
    Quiet,
    /// Exercise and machinery.
    Noisy,
    Neutral,
}

impl ModuleCategory {
    pub const ALL: [ModuleCategory; 5] = [
        ModuleCategory::Clean,
        ModuleCategory::Dirty,
        ModuleCategory::Quiet,
        ModuleCategory::Noisy,
        ModuleCategory::Neutral,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Clean => "Clean",
            Self::Dirty => "Dirty",
            Self::Quiet => "Quiet",
            Self::Noisy => "Noisy",
            Self::Neutral => "Neutral",
        }
    }
}

/// Minimum dimensions of one module type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSpec {
    pub type_name: String,
    pub width_m: f64,
    pub depth_m: f64,
    pub height_m: f64,
    pub category: ModuleCategory,
}

/// Dimensions used for any type name the catalog does not know.
pub const FALLBACK_DIMENSIONS: (f64, f64, f64) = (2.0, 2.0, 2.5);

// (name, width, depth, height, category)
const CATALOG: [(&str, f64, f64, f64, ModuleCategory); 11] = [
    (names::PRIVATE_QUARTERS, 2.0, 2.5, 3.5, ModuleCategory::Quiet),
    (names::WASHROOM, 1.5, 1.5, 2.2, ModuleCategory::Dirty),
    (names::WASTE_HUMAN, 1.2, 1.2, 2.0, ModuleCategory::Dirty),
    (names::WASTE_TRASH, 1.0, 1.2, 2.0, ModuleCategory::Dirty),
    (names::GYM, 2.5, 2.0, 2.5, ModuleCategory::Noisy),
    (names::HABITATION, 4.0, 4.0, 3.0, ModuleCategory::Neutral),
    (names::LABORATORY, 2.5, 2.0, 2.2, ModuleCategory::Neutral),
    (names::AIRLOCK, 2.0, 2.0, 2.5, ModuleCategory::Neutral),
    (names::STORAGE, 2.0, 1.5, 2.2, ModuleCategory::Neutral),
    (names::GREENHOUSE, 3.0, 2.5, 2.5, ModuleCategory::Clean),
    (names::MEDICAL_BAY, 2.5, 2.0, 2.2, ModuleCategory::Clean),
];

/// Look up (width, depth, height) for a module type.
///
/// Unknown names fall back to [`FALLBACK_DIMENSIONS`]; this is not an error.
pub fn module_dimensions(type_name: &str) -> (f64, f64, f64) {
    match CATALOG.iter().find(|entry| entry.0 == type_name) {
        Some(&(_, w, d, h, _)) => (w, d, h),
        None => {
            log::warn!("No catalog entry for module '{type_name}', using fallback dimensions");
            FALLBACK_DIMENSIONS
        }
    }
}

/// Category of a module type; unknown names are [`ModuleCategory::Neutral`].
pub fn module_category(type_name: &str) -> ModuleCategory {
    CATALOG
        .iter()
        .find(|entry| entry.0 == type_name)
        .map_or(ModuleCategory::Neutral, |entry| entry.4)
}

/// Whether the catalog has an explicit entry for this type.
pub fn is_cataloged(type_name: &str) -> bool {
    CATALOG.iter().any(|entry| entry.0 == type_name)
}

/// The full catalog as owned specs, in table order.
pub fn catalog_entries() -> Vec<ModuleSpec> {
    CATALOG
        .iter()
        .map(|&(name, width_m, depth_m, height_m, category)| ModuleSpec {
            type_name: name.to_string(),
            width_m,
            depth_m,
            height_m,
            category,
        })
        .collect()
}
