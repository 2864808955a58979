//! Engine configuration.
//!
//! Read from an optional JSON file; command-line flags override the
//! file. The backend strategy is picked here, once, before any layout
//! is generated.
//!
//! ```json
//! {
//!   "backend": "external",
//!   "native_program": "/opt/habitat/bin/habitat-native",
//!   "native_args": [],
//!   "schema_path": null,
//!   "validate": true
//! }
//! ```

use std::path::{Path, PathBuf};

use habitat_logic::schema::ParameterSchema;
use habitat_logic::LayoutError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::backend::{ExternalProcessBackend, InProcessBackend, LayoutBackend};

/// Default executable name of the out-of-process engine.
pub const DEFAULT_NATIVE_PROGRAM: &str = "habitat-native";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Schema(#[from] LayoutError),
}

/// Which backend runs generation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    #[default]
    InProcess,
    External,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub backend: BackendKind,
    /// Engine executable for [`BackendKind::External`].
    pub native_program: PathBuf,
    pub native_args: Vec<String>,
    /// Custom parameter schema; the bundled one when unset.
    pub schema_path: Option<PathBuf>,
    /// Validate parameters against the schema before generating.
    pub validate: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::InProcess,
            native_program: PathBuf::from(DEFAULT_NATIVE_PROGRAM),
            native_args: Vec::new(),
            schema_path: None,
            validate: true,
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        debug!(path = %path.display(), ?config, "loaded engine configuration");
        Ok(config)
    }

    /// The configured schema, or the bundled one.
    pub fn schema(&self) -> Result<ParameterSchema, ConfigError> {
        match &self.schema_path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                Ok(ParameterSchema::from_json(&text)?)
            }
            None => Ok(ParameterSchema::bundled()?),
        }
    }

    pub fn build_backend(&self) -> Box<dyn LayoutBackend> {
        match self.backend {
            BackendKind::InProcess => Box::new(InProcessBackend),
            BackendKind::External => Box::new(
                ExternalProcessBackend::new(&self.native_program)
                    .with_args(self.native_args.iter().cloned()),
            ),
        }
    }
}
