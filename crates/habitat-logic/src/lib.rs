//! Pure layout logic for the habitat blueprint engine.
//!
//! This crate turns a handful of mission parameters into a conceptual
//! floor plan: which modules the habitat needs, how large each one is,
//! and where each sits on one or more concentric layers around the
//! central axis. Functions take plain data and return results, so the
//! same code backs the operator CLI, the out-of-process engine and the
//! tests.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`params`] | Mission parameters, label enums, tolerant parsing |
//! | [`catalog`] | Minimum module dimensions and categories |
//! | [`budget`] | Area per crew member from duration and material |
//! | [`selection`] | Mandatory module set from mission rules |
//! | [`sizing`] | Per-module area/volume and the habitation override |
//! | [`packing`] | Radial floor-plan placement over concentric layers |
//! | [`layout`] | Pipeline orchestration, description, response envelope |
//! | [`schema`] | JSON Schema validation of raw parameters |
//! | [`metrics`] | Layout statistics, adjacency/bounds checks, volume check |
//!
//! ```
//! use habitat_logic::{generate_layout, MissionParameters};
//!
//! let layout = generate_layout(&MissionParameters::default());
//! assert_eq!(layout.modules.len(), layout.module_sizes.len());
//! ```

pub mod budget;
pub mod catalog;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod packing;
pub mod params;
pub mod schema;
pub mod selection;
pub mod sizing;

pub use error::{LayoutError, Result};
pub use layout::{generate_layout, generate_layout_from_raw, LayoutResponse, LayoutResult};
pub use params::MissionParameters;
pub use schema::{validate_parameters, ValidationError};
