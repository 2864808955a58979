//! Terminal rendering.

use habitat_logic::catalog::ModuleSpec;
use habitat_logic::metrics::{LayoutMetrics, VolumeCheck};
use habitat_logic::LayoutResult;

/// Output format for commands that print a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// The description followed by one block per layer.
pub fn render_layout(layout: &LayoutResult) -> String {
    let mut text = String::new();
    text.push_str(&layout.description);
    text.push_str("\n\n");
    text.push_str("--- Floor Plan ---\n");
    for layer in &layout.floor_plan {
        text.push_str(&format!(
            "Layer {} (radius {:.2} m, {} modules)\n",
            layer.index,
            layer.radius_m,
            layer.entries.len()
        ));
        for entry in &layer.entries {
            text.push_str(&format!(
                "  {:>6.1}°  {:>7.2} m  {:<26} {:>7.2} m²\n",
                entry.angle_deg,
                entry.distance_from_center_m,
                entry.module_name,
                entry.size.area_m2
            ));
        }
    }
    text
}

pub fn render_catalog(entries: &[ModuleSpec]) -> String {
    let mut text = String::new();
    text.push_str(&format!(
        "{:<26} {:>6} {:>6} {:>6}  {}\n",
        "Module",
        "W (m)",
        "D (m)",
        "H (m)",
        "Category"
    ));
    for spec in entries {
        text.push_str(&format!(
            "{:<26} {:>6.1} {:>6.1} {:>6.1}  {}\n",
            spec.type_name,
            spec.width_m,
            spec.depth_m,
            spec.height_m,
            spec.category.label()
        ));
    }
    text
}

/// Metrics overview, the volume rule outcome, then each violation.
pub fn render_metrics(metrics: &LayoutMetrics, volume: &VolumeCheck) -> String {
    let mut text = metrics.summary_text();
    text.push_str("\n\n");
    text.push_str(&volume.message());
    text.push('\n');
    for v in &metrics.violations {
        text.push_str(&format!(
            "  [{}] layer {} severity {:.2}: {}\n",
            v.kind,
            v.layer,
            v.severity,
            v.description
        ));
    }
    text
}
