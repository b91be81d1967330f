use thiserror::Error;

use super::config::ConfigError;
use super::extract::ExtractError;
use crate::core::color::ColorError;
use crate::core::label::LabelError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error("Color resolution failed: {0}")]
    Color(#[from] ColorError),

    #[error("Label formatting failed: {0}")]
    Label(#[from] LabelError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Restraint index {index} is out of range ({count} restraints available)")]
    RestraintIndexOutOfRange { index: usize, count: usize },

    #[error("Failed to serialize scene document: {0}")]
    Serialization(#[from] serde_json::Error),
}
