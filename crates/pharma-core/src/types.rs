//! # Domain Types
//!
//! Core domain types used throughout PharmaCare POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Medicine     │   │   PaymentInfo   │   │ StockAdjustment │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  method         │   │  kind           │       │
//! │  │  name/generic   │   │  customer_name  │   │  quantity       │       │
//! │  │  price (Money)  │   │  sold_by        │   │  reason         │       │
//! │  │  stock/reorder  │   └─────────────────┘   └─────────────────┘       │
//! │  │  batch/expiry   │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Entities carry a UUID `id` (immutable, used for references) and, where one
//! exists, a human-readable business key (barcode, transaction id).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{
    validate_barcode, validate_medicine_name, validate_price_cents, validate_quantity,
};

/// Generates a fresh entity id.
#[inline]
pub fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Medicine
// =============================================================================

/// A medicine available for sale.
///
/// ## Stock Mutation Rules
/// `stock` is only ever written by the catalog: either through the sale
/// commit path or through an explicit [`StockAdjustment`]. Nothing else in
/// the system writes to it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Medicine {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on the shelf and on receipts.
    pub name: String,

    /// Generic (pharmacological) name.
    pub generic_name: String,

    /// Barcode (EAN-13, UPC-A, etc.).
    pub barcode: String,

    /// Manufacturer name.
    pub manufacturer: String,

    /// Category, e.g. "Pain Relief", "Antibiotics".
    pub category: String,

    /// Dosage form: tablet, syrup, injection.
    pub dosage_form: String,

    /// Strength, e.g. "500mg".
    pub strength: String,

    /// Unit price. Non-negative.
    pub price: Money,

    /// Current stock level. Non-negative.
    pub stock: i64,

    /// Stock level at which the item shows up in low-stock reports.
    pub reorder_level: i64,

    /// Batch number of the stock on hand.
    pub batch_number: String,

    /// Expiry date of the current batch.
    #[ts(as = "String")]
    pub expiry_date: NaiveDate,

    /// Physical location, e.g. "Shelf A1".
    pub location: String,

    /// Supplier name.
    pub supplier: String,
}

impl Medicine {
    /// Validates the invariants a medicine must satisfy before it enters the
    /// catalog: non-empty id and name, non-negative price and stock.
    ///
    /// Field-level formats (barcode) are checked too so malformed records
    /// are rejected at the boundary rather than discovered mid-sale.
    pub fn validate(&self) -> CoreResult<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "id".to_string(),
            }
            .into());
        }
        validate_medicine_name(&self.name)?;
        validate_barcode(&self.barcode)?;
        validate_price_cents(self.price.cents())?;
        if self.stock < 0 {
            return Err(ValidationError::NegativeAmount {
                field: "stock".to_string(),
            }
            .into());
        }
        if self.reorder_level < 0 {
            return Err(ValidationError::NegativeAmount {
                field: "reorder_level".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Whether stock has fallen to or below the reorder level.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.reorder_level
    }

    /// Whether the current batch has expired as of `today`.
    #[inline]
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }
}

// =============================================================================
// Payment
// =============================================================================

/// How a sale was paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Billed to an insurance provider.
    Insurance,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Insurance => "Insurance",
        };
        f.write_str(label)
    }
}

/// Payment details handed to the finalizer together with the cart.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentInfo {
    /// Payment method selected at the till.
    pub method: PaymentMethod,

    /// Walk-in customers stay anonymous; insurance sales carry a name.
    pub customer_name: Option<String>,

    /// User who rang up the sale.
    pub sold_by: String,
}

impl PaymentInfo {
    /// Cash payment by the given cashier, anonymous customer.
    pub fn cash(sold_by: impl Into<String>) -> Self {
        PaymentInfo {
            method: PaymentMethod::Cash,
            customer_name: None,
            sold_by: sold_by.into(),
        }
    }
}

// =============================================================================
// Stock Adjustment
// =============================================================================

/// Why stock was adjusted outside a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockAdjustmentKind {
    /// Stock received from a supplier.
    Addition,
    /// Manual reduction (count correction, returns to supplier).
    Reduction,
    /// Batch expired and was pulled from the shelf.
    Expiry,
    /// Damaged goods written off.
    Damage,
}

impl StockAdjustmentKind {
    /// Whether this kind increases stock; all others decrease it.
    #[inline]
    pub fn is_increase(&self) -> bool {
        matches!(self, StockAdjustmentKind::Addition)
    }
}

/// A manual stock movement, kept as an audit record.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockAdjustment {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Medicine being adjusted.
    pub medicine_id: String,

    /// Direction and reason category.
    pub kind: StockAdjustmentKind,

    /// Units moved. Always positive; `kind` carries the direction.
    pub quantity: i64,

    /// Free-text reason keyed in by the user.
    pub reason: String,

    /// User who recorded the adjustment.
    pub adjusted_by: String,

    /// Batch the adjustment applies to.
    pub batch_number: String,

    /// When the adjustment was recorded.
    #[ts(as = "String")]
    pub adjusted_at: DateTime<Utc>,
}

impl StockAdjustment {
    /// Builds a validated adjustment with a fresh id.
    pub fn new(
        medicine_id: impl Into<String>,
        kind: StockAdjustmentKind,
        quantity: i64,
        reason: impl Into<String>,
        adjusted_by: impl Into<String>,
        batch_number: impl Into<String>,
    ) -> CoreResult<Self> {
        validate_quantity(quantity)?;
        Ok(StockAdjustment {
            id: new_entity_id(),
            medicine_id: medicine_id.into(),
            kind,
            quantity,
            reason: reason.into(),
            adjusted_by: adjusted_by.into(),
            batch_number: batch_number.into(),
            adjusted_at: Utc::now(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
