//! # Validation Module
//!
//! Input validation utilities for PharmaCare POS.
//!
//! ## Validation Strategy
//! Validation runs at the boundary, before any state mutates. The UI layer
//! repeats cheap checks for immediate feedback, but this module is the
//! authority: a value that passes here is safe for the business logic.
//!
//! ## Usage
//! ```rust
//! use pharma_core::validation::{validate_quantity, validate_medicine_name};
//!
//! validate_medicine_name("Paracetamol 500mg").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a medicine display name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_medicine_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: "must be at most 200 characters".to_string(),
        });
    }

    Ok(())
}

/// Validates a barcode.
///
/// ## Rules
/// - Must not be empty
/// - Digits only, 8 to 14 characters (covers EAN-8 through GTIN-14)
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if barcode.len() < 8 || barcode.len() > 14 || !barcode.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: "must be 8-14 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query. Empty is allowed (lists everything).
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::InvalidFormat {
            field: "query".to_string(),
            reason: "must be at most 100 characters".to_string(),
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: samples, donations)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::NegativeAmount {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
