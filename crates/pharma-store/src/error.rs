//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! std::io::Error / serde_json::Error
//!        │
//!        ▼
//! StoreError (this module) ← adds context and categorization
//!        │
//!        ▼
//! PosError (session crate) ← what the UI layer sees
//! ```

use thiserror::Error;

/// Persistence operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a snapshot file failed.
    ///
    /// ## When This Occurs
    /// - Data directory not writable
    /// - Disk full
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot file exists but does not parse.
    ///
    /// ## When This Occurs
    /// - File edited by hand
    /// - Partial write from a crashed process
    #[error("snapshot corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
