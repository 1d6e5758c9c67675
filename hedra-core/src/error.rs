//! Error types for the hedra core.
//!
//! Fallible operations return `hedra_core::Result<T>`.

use thiserror::Error;

/// Unified error type.
#[derive(Debug, Error)]
pub enum HedraError {
    /// Mesh construction input is malformed.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// A plane was requested from fewer than three points.
    #[error("Degenerate plane: need at least 3 points, got {points}")]
    DegeneratePlane { points: usize },

    /// An integer selector in a scene document has no matching model.
    #[error("Unknown {kind} selector: {value}")]
    InvalidSelector { kind: &'static str, value: i64 },

    /// No mesh with this id exists in the scene.
    #[error("Unknown mesh id: {0}")]
    UnknownMesh(u32),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for HedraError {
    fn from(err: serde_json::Error) -> Self {
        HedraError::Serialization(err.to_string())
    }
}

/// Convenience alias for `Result<T, HedraError>`.
pub type Result<T> = std::result::Result<T, HedraError>;
