//! Unified error handling for the storemap engine.

use thiserror::Error;

/// Errors surfaced by the storemap engine.
///
/// Invariant violations around marker attach/detach are prevented
/// structurally (idempotent re-attach-before-detach ordering) and do not
/// appear here.
#[derive(Debug, Error)]
pub enum StoreMapError {
    /// A merchant source request failed. The engine keeps its last-known-good
    /// marker state when this is returned from a load or search.
    #[error("merchant source request failed: {0}")]
    Source(String),

    /// An icon was requested for a location with no visible merchants.
    /// Callers must skip empty groups before rendering.
    #[error("location '{key}' has no visible merchants to render")]
    EmptyLocation { key: String },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreMapError>;
