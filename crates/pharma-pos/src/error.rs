//! # Session Error Types
//!
//! What the UI layer sees. Wraps the lower layers without losing the typed
//! cause; the front-end decides how to present each case.

use pharma_core::CoreError;
use pharma_store::StoreError;
use thiserror::Error;

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum PosError {
    /// A business rule rejected the operation. State is unchanged.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Persistence failed. The in-memory session is still consistent.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for session operations.
pub type PosResult<T> = Result<T, PosError>;
