//! # Error Types
//!
//! Domain-specific error types for pharma-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pharma-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pharma-store errors (separate crate)                                  │
//! │  └── StoreError       - Persistence failures                           │
//! │                                                                         │
//! │  pharma-pos errors (session crate)                                     │
//! │  └── PosError         - What the UI layer sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → PosError → UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (medicine id, quantities, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every failure leaves the domain objects untouched (validate-then-act)

use thiserror::Error;

// =============================================================================
// Stock Shortage
// =============================================================================

/// One cart line that asked for more than the catalog can supply.
///
/// Finalization reports *every* short line in a single error so the UI can
/// show the whole picture at once instead of failing line by line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockShortage {
    /// Medicine the cart line refers to.
    pub medicine_id: String,
    /// Display name at the time of the check.
    pub medicine_name: String,
    /// Quantity the cart asked for.
    pub requested: i64,
    /// Stock actually on hand.
    pub available: i64,
}

impl std::fmt::Display for StockShortage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: requested {}, available {}",
            self.medicine_name, self.requested, self.available
        )
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. All of them are
/// recoverable; they are surfaced to the caller and never abort the process.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A sale was requested for an empty cart.
    #[error("cart is empty, nothing to sell")]
    EmptyCart,

    /// One or more cart lines exceed the stock on hand.
    ///
    /// ## When This Occurs
    /// - Stock was consumed by an earlier sale while the cart was open
    /// - The cashier keyed a quantity larger than the shelf holds
    ///
    /// Carries every offending line, not just the first.
    #[error("insufficient stock for {} line(s): {}", .0.len(), format_shortages(.0))]
    InsufficientStock(Vec<StockShortage>),

    /// Medicine cannot be found in the catalog.
    ///
    /// ## When This Occurs
    /// - A cart line refers to a medicine deleted from inventory
    /// - A lookup uses a stale id
    #[error("medicine not found: {0}")]
    MedicineNotFound(String),

    /// Cart has exceeded the maximum number of distinct lines.
    #[error("cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// A stock adjustment would take stock below zero.
    #[error("adjustment of {quantity} exceeds stock {available} for {medicine_id}")]
    AdjustmentExceedsStock {
        medicine_id: String,
        quantity: i64,
        available: i64,
    },

    /// The prescription is not in a state that allows the operation.
    ///
    /// ## When This Occurs
    /// - Dispensing a cancelled prescription
    /// - Completing one that never started processing
    #[error("prescription {prescription_id} is {current_status}, cannot {operation}")]
    InvalidPrescriptionStatus {
        prescription_id: String,
        current_status: String,
        operation: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn format_shortages(shortages: &[StockShortage]) -> String {
    shortages
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when input does not meet requirements, caught at the boundary
/// before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be a positive integer.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A monetary amount came in negative.
    #[error("{field} must not be negative")]
    NegativeAmount { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed barcode).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
