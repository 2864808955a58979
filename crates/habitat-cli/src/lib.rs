//! Front end for the habitat layout engine.
//!
//! The engine itself lives in `habitat-logic`. This crate adds what a
//! running program needs around it: configuration, the choice between
//! generating in-process or in a separate engine process, logging, and
//! text rendering for the terminal.

pub mod backend;
pub mod config;
pub mod logging;
pub mod native;
pub mod output;

pub use backend::{BackendError, ExternalProcessBackend, InProcessBackend, LayoutBackend};
pub use config::{BackendKind, ConfigError, EngineConfig};
