use thiserror::Error;

use crate::schema::ValidationError;

/// Convenient result alias for the layout engine.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Top-level engine error type.
///
/// Generation itself never fails; these only surface while turning raw
/// caller input into [`crate::MissionParameters`] or while validating it.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Raw parameters were present but had the wrong JSON types.
    #[error("invalid mission parameters: {0}")]
    InvalidParameters(#[from] serde_json::Error),

    /// Raw parameters violated the parameter schema.
    #[error(transparent)]
    Schema(#[from] ValidationError),

    /// The schema document itself could not be used.
    #[error("invalid parameter schema: {message}")]
    InvalidSchema { message: String },
}
