//! Harness error type.

use skibidi_core::GenerateError;

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("generation failed: {0}")]
    Generate(#[from] GenerateError),
    #[error("invalid seed literal: '{0}'")]
    InvalidSeed(String),
    #[error("unknown tier: '{0}' (expected scalar, vector256 or vector512)")]
    UnknownTier(String),
}
