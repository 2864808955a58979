//! Layout assembly: the full generation pipeline.
//!
//! parameters → area budget → module selection → sizing → packing →
//! assembled [`LayoutResult`]. Every call builds a fresh result from the
//! immutable parameters; nothing is cached between calls and the same
//! parameters always give the same layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::budget;
use crate::catalog::names;
use crate::error::Result;
use crate::packing::{self, Layer};
use crate::params::MissionParameters;
use crate::selection::required_modules;
use crate::sizing::{size_modules, ModuleSize};

/// Presentation placeholder until rendered imagery exists.
pub const PLACEHOLDER_IMAGE_URL: &str = "/Images/modern-space-habitat-with-cosmic-view.jpg";

/// A generated habitat layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    /// Module names in selection (and packing) order.
    pub modules: Vec<String>,
    pub module_sizes: BTreeMap<String, ModuleSize>,
    pub description: String,
    pub floor_plan: Vec<Layer>,
    pub image_url: String,
}

impl LayoutResult {
    pub fn layer_count(&self) -> usize {
        self.floor_plan.len()
    }

    /// Find where a module was placed.
    pub fn placement(&self, module_name: &str) -> Option<(&Layer, &packing::FloorPlanEntry)> {
        self.floor_plan.iter().find_map(|layer| {
            layer
                .entries
                .iter()
                .find(|e| e.module_name == module_name)
                .map(|e| (layer, e))
        })
    }
}

/// Wire envelope shared by the in-process and out-of-process engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LayoutResponse {
    Success(LayoutResult),
    Error { message: String },
}

impl LayoutResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn into_result(self) -> std::result::Result<LayoutResult, String> {
        match self {
            Self::Success(layout) => Ok(layout),
            Self::Error { message } => Err(message),
        }
    }
}

impl From<LayoutResult> for LayoutResponse {
    fn from(layout: LayoutResult) -> Self {
        Self::Success(layout)
    }
}

/// Generate a layout. Never fails.
pub fn generate_layout(params: &MissionParameters) -> LayoutResult {
    let area_per_crew = budget::area_per_crew(params.mission_days, params.habitat_material.label());
    let total_area = area_per_crew * params.crew_size as f64;
    log::debug!(
        "Area budget: {area_per_crew:.2} m² per crew, {total_area:.2} m² total for {} crew",
        params.crew_size
    );

    let modules = required_modules(params);
    log::debug!("Selected {} modules: {}", modules.len(), modules.join(", "));

    let module_sizes = size_modules(&modules, total_area);

    let layers = packing::layer_count(params);
    let floor_plan = packing::pack_floor_plan(&modules, &module_sizes, total_area, layers);
    log::debug!(
        "Packed {} modules on {layers} layer(s) of radius {:.2} m",
        packing::placed_count(&floor_plan),
        packing::layer_radius(total_area, layers)
    );

    let habitation_area = module_sizes.get(names::HABITATION).map(|s| s.area_m2);
    let description = describe(
        params,
        area_per_crew,
        total_area,
        &modules,
        habitation_area,
        layers,
    );

    LayoutResult {
        modules,
        module_sizes,
        description,
        floor_plan,
        image_url: PLACEHOLDER_IMAGE_URL.to_string(),
    }
}

/// Parse raw parameters (bare or `"habitat"`-wrapped) and generate.
pub fn generate_layout_from_raw(raw: &Value) -> Result<LayoutResult> {
    let params = MissionParameters::from_raw(raw)?;
    Ok(generate_layout(&params))
}

fn describe(
    params: &MissionParameters,
    area_per_crew: f64,
    total_area: f64,
    modules: &[String],
    habitation_area: Option<f64>,
    layers: u32,
) -> String {
    let mut text = String::new();
    text.push_str(&format!(
        "Conceptual {} habitat for {} crew on a {}-day {} mission.\n",
        params.habitat_material.label(),
        params.crew_size,
        params.mission_days,
        params.mission_type.label()
    ));
    text.push_str(&format!("Material: {}\n", params.habitat_material.label()));
    text.push_str(&format!("Crew: {}\n", params.crew_size));
    text.push_str(&format!("Duration: {} days\n", params.mission_days));
    text.push_str(&format!("Location: {}\n", params.location.label()));
    text.push_str(&format!("Deployment vehicle: {}\n", params.deployment_vehicle.label()));
    text.push_str(&format!("Total area: {total_area:.2} m²\n"));
    text.push_str(&format!("Area per crew member: {area_per_crew:.2} m²\n"));
    text.push_str(&format!("Modules ({}): {}\n", modules.len(), modules.join(", ")));
    match habitation_area {
        Some(area) => text.push_str(&format!("Main habitation area: {area:.2} m²\n")),
        None => text.push_str("Main habitation area: none\n"),
    }
    text.push_str(&format!("Layers: {layers}"));
    text
}
