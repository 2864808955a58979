//! Parameter validation against a JSON Schema.
//!
//! The schema describes the `{"habitat": {...}}` request shape. Any
//! schema the `jsonschema` crate can compile is accepted, including
//! custom ones with `$ref`, `pattern` or combinators. Only the first
//! violation is reported, with the dotted path of the offending value:
//!
//! ```
//! use habitat_logic::schema::validate_parameters;
//! use serde_json::json;
//!
//! let err = validate_parameters(&json!({
//!     "location": "Moon/Lunar Surface",
//!     "crew_size": 1,
//!     "mission_days": 30,
//!     "mission_type": "Exploration",
//!     "deployment_vehicle": "SLS",
//!     "habitat_material": "Hybrid"
//! }))
//! .unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Validation Error for 'habitat.crew_size': 1 is less than the minimum of 2"
//! );
//! ```

use std::fmt;

use jsonschema::Validator;
use serde_json::{Map, Value};

use crate::error::{LayoutError, Result};
use crate::params::WRAPPER_KEY;

/// Schema bundled with the engine.
pub const DEFAULT_SCHEMA: &str = include_str!("../../../data/habitat_schema.json");

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Keys/indices from the document root to the offending value.
    pub path: Vec<String>,
    pub message: String,
}

impl ValidationError {
    /// Convert the validator's error, turning its JSON pointer into path
    /// segments.
    fn from_jsonschema(err: &jsonschema::ValidationError<'_>) -> Self {
        let pointer = err.instance_path.to_string();
        let path = match pointer.strip_prefix('/') {
            Some(rest) => rest
                .split('/')
                .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
                .collect(),
            None => Vec::new(),
        };
        Self {
            path,
            message: err.to_string(),
        }
    }

    /// Dotted path, empty at the root.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "Validation Error: {}", self.message)
        } else {
            write!(
                f,
                "Validation Error for '{}': {}",
                self.path_string(),
                self.message
            )
        }
    }
}

impl std::error::Error for ValidationError {}

/// A compiled parameter schema.
pub struct ParameterSchema {
    validator: Validator,
}

impl fmt::Debug for ParameterSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterSchema").finish_non_exhaustive()
    }
}

impl ParameterSchema {
    pub fn from_value(root: Value) -> Result<Self> {
        if !(root.is_object() || root.is_boolean()) {
            return Err(LayoutError::InvalidSchema {
                message: "schema root must be an object or a boolean".to_string(),
            });
        }
        let validator =
            jsonschema::validator_for(&root).map_err(|e| LayoutError::InvalidSchema {
                message: e.to_string(),
            })?;
        Ok(Self { validator })
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let root = serde_json::from_str(text).map_err(|e| LayoutError::InvalidSchema {
            message: e.to_string(),
        })?;
        Self::from_value(root)
    }

    /// The bundled schema.
    pub fn bundled() -> Result<Self> {
        Self::from_json(DEFAULT_SCHEMA)
    }

    /// Validate a document exactly as given.
    pub fn validate(&self, instance: &Value) -> std::result::Result<(), ValidationError> {
        match self.validator.iter_errors(instance).next() {
            Some(err) => Err(ValidationError::from_jsonschema(&err)),
            None => Ok(()),
        }
    }

    /// Validate mission parameters, wrapping a bare mapping under
    /// `"habitat"` first. Only an object under `"habitat"` counts as the
    /// wrapper, the same rule [`crate::MissionParameters::from_raw`] uses.
    pub fn validate_parameters(&self, raw: &Value) -> std::result::Result<(), ValidationError> {
        if raw.get(WRAPPER_KEY).is_some_and(Value::is_object) {
            return self.validate(raw);
        }
        let mut wrapped = Map::new();
        wrapped.insert(WRAPPER_KEY.to_string(), raw.clone());
        self.validate(&Value::Object(wrapped))
    }
}

/// Validate raw mission parameters against the bundled schema.
pub fn validate_parameters(raw: &Value) -> Result<()> {
    ParameterSchema::bundled()?.validate_parameters(raw)?;
    Ok(())
}
