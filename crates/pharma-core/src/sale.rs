//! # Sale Finalization
//!
//! Converts a cart into an immutable [`Sale`] and commits the stock changes.
//!
//! ## Finalize Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Finalize Flow                                     │
//! │                                                                         │
//! │  1. VALIDATE                                                           │
//! │     ├── cart empty?             → EmptyCart, nothing touched           │
//! │     ├── line without a medicine → MedicineNotFound, nothing touched    │
//! │     └── any line short on stock → InsufficientStock (ALL short lines), │
//! │                                   nothing touched                      │
//! │                                                                         │
//! │  2. COMMIT                                                             │
//! │     └── decrement stock for every line, one unit, same &mut borrow     │
//! │                                                                         │
//! │  3. ASSEMBLE                                                           │
//! │     ├── snapshot lines (id, name, batch, price, qty)                   │
//! │     ├── recompute total from the snapshot                              │
//! │     └── stamp transaction id + timestamp → Sale                        │
//! │                                                                         │
//! │  Caller clears the cart after success.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validate-then-act ordering means a failed finalize can never leave a
//! partial stock decrement behind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{new_entity_id, PaymentInfo};

// =============================================================================
// Transaction Identity
// =============================================================================

/// Business identifier of a completed sale, e.g. `SALE-20260807-142501-0000`.
///
/// Unique within the process lifetime: the date-time part orders sales,
/// the trailing counter disambiguates sales within the same second.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionId(String);

impl TransactionId {
    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues transaction identifiers that never repeat and never go backwards.
///
/// ## Collision Handling
/// Two sales in the same wall-clock second get distinct counters. A clock
/// that steps backwards (NTP correction) keeps issuing under the last seen
/// stamp instead of reusing an earlier one.
#[derive(Debug)]
pub struct TransactionIdGenerator {
    last: DateTime<Utc>,
    seq: u32,
}

impl TransactionIdGenerator {
    /// Creates a generator with no issued identifiers.
    pub fn new() -> Self {
        TransactionIdGenerator {
            last: DateTime::<Utc>::UNIX_EPOCH,
            seq: 0,
        }
    }

    /// Issues the next identifier.
    pub fn next_id(&mut self) -> TransactionId {
        let now = Utc::now();
        if now.timestamp() > self.last.timestamp() {
            self.last = now;
            self.seq = 0;
        } else {
            // Same second, or the clock stepped backwards: keep the last
            // stamp and let the counter disambiguate.
            self.seq += 1;
        }
        TransactionId(format!(
            "SALE-{}-{:04}",
            self.last.format("%Y%m%d-%H%M%S"),
            self.seq
        ))
    }
}

impl Default for TransactionIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// One line of a finalized sale.
///
/// Uses the snapshot pattern: medicine details are frozen here so later
/// catalog edits never rewrite sales history.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleLine {
    medicine_id: String,
    name: String,
    batch_number: String,
    unit_price: Money,
    quantity: i64,
    line_total: Money,
}

impl SaleLine {
    /// Id of the medicine sold.
    pub fn medicine_id(&self) -> &str {
        &self.medicine_id
    }

    /// Medicine name at the time of sale (frozen).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Batch number at the time of sale (frozen).
    pub fn batch_number(&self) -> &str {
        &self.batch_number
    }

    /// Unit price at the time of sale (frozen).
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Quantity sold.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.line_total
    }
}

/// An immutable record of a completed transaction.
///
/// Created only by [`SaleFinalizer::finalize`]; fields are private and only
/// readable, so a sale on file can never drift after the fact. Refunds and
/// voids are not part of this system.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    id: String,
    transaction_id: TransactionId,
    lines: Vec<SaleLine>,
    total: Money,
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
    payment: PaymentInfo,
    prescription_id: Option<String>,
}

impl Sale {
    /// Internal identifier (UUID v4).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Business identifier printed on the receipt.
    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    /// The finalized lines.
    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    /// Grand total, computed from the line snapshots at finalize time.
    pub fn total(&self) -> Money {
        self.total
    }

    /// When the sale was finalized.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Payment details.
    pub fn payment(&self) -> &PaymentInfo {
        &self.payment
    }

    /// Prescription this sale dispensed, if any.
    pub fn prescription_id(&self) -> Option<&str> {
        self.prescription_id.as_deref()
    }
}

// =============================================================================
// Sale Finalizer
// =============================================================================

/// Validates a cart against the catalog and turns it into a [`Sale`].
///
/// The only component allowed to trigger a stock decrement. Owns the
/// transaction id generator, so identifier uniqueness holds across every
/// sale this finalizer produces.
#[derive(Debug, Default)]
pub struct SaleFinalizer {
    ids: TransactionIdGenerator,
}

impl SaleFinalizer {
    /// Creates a finalizer with a fresh id generator.
    pub fn new() -> Self {
        SaleFinalizer {
            ids: TransactionIdGenerator::new(),
        }
    }

    /// Finalizes a walk-in sale.
    pub fn finalize(
        &mut self,
        catalog: &mut Catalog,
        cart: &Cart,
        payment: PaymentInfo,
    ) -> CoreResult<Sale> {
        self.finalize_with_link(catalog, cart, payment, None)
    }

    /// Finalizes a sale, optionally linked to the prescription it dispenses.
    ///
    /// On any error the catalog and cart are exactly as they were. On
    /// success stock is decremented and the caller clears the cart.
    pub fn finalize_with_link(
        &mut self,
        catalog: &mut Catalog,
        cart: &Cart,
        payment: PaymentInfo,
        prescription_id: Option<String>,
    ) -> CoreResult<Sale> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        // Check-then-decrement happens inside the catalog under this one
        // &mut borrow; no other mutation can interleave.
        catalog.commit_sale(cart.lines())?;

        let lines: Vec<SaleLine> = cart
            .lines()
            .iter()
            .map(|line| SaleLine {
                medicine_id: line.medicine_id().to_string(),
                name: line.name().to_string(),
                batch_number: line.batch_number().to_string(),
                unit_price: line.unit_price(),
                quantity: line.quantity(),
                line_total: line.line_total(),
            })
            .collect();

        // Recomputed from the snapshot, not taken from cart.total().
        let total: Money = lines.iter().map(SaleLine::line_total).sum();

        Ok(Sale {
            id: new_entity_id(),
            transaction_id: self.ids.next_id(),
            lines,
            total,
            created_at: Utc::now(),
            payment,
            prescription_id,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
