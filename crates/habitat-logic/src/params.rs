//! Mission parameters: the immutable input to layout generation.
//!
//! Every choice a planner makes on the parameter screen ends up here:
//! where the habitat goes, how many people live in it, for how long,
//! what it is for, how it gets there and what its shell is made of.
//!
//! The four choice fields are label enums. Known labels map to named
//! variants; anything else is kept verbatim in an `Other` variant so a
//! free-form label still reaches the engine (the area budget matches
//! material labels by substring, not by variant).
//!
//! ```
//! use habitat_logic::params::{HabitatMaterial, MissionParameters};
//! use serde_json::json;
//!
//! let params = MissionParameters::from_raw(&json!({
//!     "habitat": { "crew_size": 6, "habitat_material": "Inflatable Softgoods" }
//! }))
//! .unwrap();
//! assert_eq!(params.crew_size, 6);
//! assert_eq!(params.mission_days, 30);
//! assert_eq!(params.habitat_material, HabitatMaterial::InflatableSoftgoods);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Key of the wrapper object used by the schema and the native engine.
pub const WRAPPER_KEY: &str = "habitat";

pub const DEFAULT_CREW_SIZE: u32 = 4;
pub const DEFAULT_MISSION_DAYS: u32 = 30;

// ============================================================================
// LOCATION
// ============================================================================

/// Where the habitat is deployed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Location {
    LunarSurface,
    CisLunarTransit,
    MarsTransit,
    #[default]
    Unknown,
    Other(String),
}

impl Location {
    pub const KNOWN: [Location; 3] = [
        Location::LunarSurface,
        Location::CisLunarTransit,
        Location::MarsTransit,
    ];

    pub fn label(&self) -> &str {
        match self {
            Self::LunarSurface => "Moon/Lunar Surface",
            Self::CisLunarTransit => "Transit (Deep Space, Cis-Lunar)",
            Self::MarsTransit => "Mars Transit Habitat",
            Self::Unknown => "Unknown",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for Location {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Moon/Lunar Surface" => Self::LunarSurface,
            "Transit (Deep Space, Cis-Lunar)" => Self::CisLunarTransit,
            "Mars Transit Habitat" => Self::MarsTransit,
            "Unknown" => Self::Unknown,
            _ => Self::Other(label),
        }
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        match location {
            Location::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

// ============================================================================
// MISSION TYPE
// ============================================================================

/// What the crew is there to do.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MissionType {
    #[default]
    Exploration,
    ScienceResearch,
    Other(String),
}

impl MissionType {
    pub const KNOWN: [MissionType; 2] = [MissionType::Exploration, MissionType::ScienceResearch];

    pub fn label(&self) -> &str {
        match self {
            Self::Exploration => "Exploration",
            Self::ScienceResearch => "Science & Research",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for MissionType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Exploration" => Self::Exploration,
            "Science & Research" => Self::ScienceResearch,
            _ => Self::Other(label),
        }
    }
}

impl From<MissionType> for String {
    fn from(mission_type: MissionType) -> Self {
        match mission_type {
            MissionType::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

// ============================================================================
// DEPLOYMENT VEHICLE
// ============================================================================

/// Launch system delivering the habitat.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeploymentVehicle {
    #[default]
    Sls,
    CommercialLaunch,
    Other(String),
}

impl DeploymentVehicle {
    pub const KNOWN: [DeploymentVehicle; 2] =
        [DeploymentVehicle::Sls, DeploymentVehicle::CommercialLaunch];

    pub fn label(&self) -> &str {
        match self {
            Self::Sls => "SLS",
            Self::CommercialLaunch => "Commercial Launch Vehicles",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for DeploymentVehicle {
    fn from(label: String) -> Self {
        match label.as_str() {
            "SLS" => Self::Sls,
            "Commercial Launch Vehicles" => Self::CommercialLaunch,
            _ => Self::Other(label),
        }
    }
}

impl From<DeploymentVehicle> for String {
    fn from(vehicle: DeploymentVehicle) -> Self {
        match vehicle {
            DeploymentVehicle::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

// ============================================================================
// HABITAT MATERIAL
// ============================================================================

/// Structural material of the pressure shell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HabitatMaterial {
    #[default]
    MetallicHardShell,
    InflatableSoftgoods,
    Hybrid,
    InSituRegolith,
    Other(String),
}

impl HabitatMaterial {
    pub const KNOWN: [HabitatMaterial; 4] = [
        HabitatMaterial::MetallicHardShell,
        HabitatMaterial::InflatableSoftgoods,
        HabitatMaterial::Hybrid,
        HabitatMaterial::InSituRegolith,
    ];

    pub fn label(&self) -> &str {
        match self {
            Self::MetallicHardShell => "Metallic Hard Shell",
            Self::InflatableSoftgoods => "Inflatable Softgoods",
            Self::Hybrid => "Hybrid",
            Self::InSituRegolith => "In-Situ Regolith",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for HabitatMaterial {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Metallic Hard Shell" => Self::MetallicHardShell,
            "Inflatable Softgoods" => Self::InflatableSoftgoods,
            "Hybrid" => Self::Hybrid,
            "In-Situ Regolith" => Self::InSituRegolith,
            _ => Self::Other(label),
        }
    }
}

impl From<HabitatMaterial> for String {
    fn from(material: HabitatMaterial) -> Self {
        match material {
            HabitatMaterial::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

// ============================================================================
// PARAMETERS
// ============================================================================

/// Complete mission parameter set. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionParameters {
    pub location: Location,
    #[serde(deserialize_with = "whole_count")]
    pub crew_size: u32,
    #[serde(deserialize_with = "whole_count")]
    pub mission_days: u32,
    pub mission_type: MissionType,
    pub deployment_vehicle: DeploymentVehicle,
    pub habitat_material: HabitatMaterial,
}

impl Default for MissionParameters {
    fn default() -> Self {
        Self {
            location: Location::Unknown,
            crew_size: DEFAULT_CREW_SIZE,
            mission_days: DEFAULT_MISSION_DAYS,
            mission_type: MissionType::Exploration,
            deployment_vehicle: DeploymentVehicle::Sls,
            habitat_material: HabitatMaterial::MetallicHardShell,
        }
    }
}

impl MissionParameters {
    /// Initial selections of the parameter form. Unlike [`Default`], every
    /// field holds a label the parameter schema accepts.
    pub fn form_default() -> Self {
        Self {
            location: Location::LunarSurface,
            ..Self::default()
        }
    }

    /// Parse a raw parameter mapping, bare or wrapped under `"habitat"`.
    ///
    /// `null` yields the defaults. Wrong JSON types (a string crew size,
    /// a negative day count) are reported rather than guessed at.
    pub fn from_raw(raw: &Value) -> Result<Self> {
        if raw.is_null() {
            return Ok(Self::default());
        }
        let inner = raw
            .get(WRAPPER_KEY)
            .filter(|v| v.is_object())
            .unwrap_or(raw);
        Ok(Self::deserialize(inner)?)
    }

    /// The `{"habitat": {...}}` request shape.
    pub fn to_request(&self) -> Value {
        let mut request = serde_json::Map::new();
        request.insert(
            WRAPPER_KEY.to_string(),
            serde_json::to_value(self).unwrap_or(Value::Null),
        );
        Value::Object(request)
    }
}

/// A non-negative count that fits `u32`. Whole-valued floats (`4.0`)
/// are accepted, since JSON Schema treats them as integers.
fn whole_count<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct WholeCount;

    impl serde::de::Visitor<'_> for WholeCount {
        type Value = u32;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a non-negative whole number")
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<u32, E> {
            u32::try_from(v)
                .map_err(|_| E::invalid_value(serde::de::Unexpected::Unsigned(v), &self))
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> std::result::Result<u32, E> {
            u32::try_from(v)
                .map_err(|_| E::invalid_value(serde::de::Unexpected::Signed(v), &self))
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> std::result::Result<u32, E> {
            if v.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&v) {
                Ok(v as u32)
            } else {
                Err(E::invalid_value(serde::de::Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(WholeCount)
}
