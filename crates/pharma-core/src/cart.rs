//! # Cart
//!
//! The in-progress, mutable selection of medicines for one pending sale.
//!
//! ## Invariants
//! - Lines are unique by medicine id (adding the same medicine again
//!   increments the existing line)
//! - Every resident line has quantity > 0; a line driven to 0 is removed
//! - At most [`MAX_CART_ITEMS`](crate::MAX_CART_ITEMS) distinct lines,
//!   at most [`MAX_ITEM_QUANTITY`](crate::MAX_ITEM_QUANTITY) of one medicine
//! - The total is recomputed from the lines on every call, never cached
//!
//! There is deliberately no stock check at add-time: stock is reserved only
//! at finalize, so an open cart never holds a reservation while the customer
//! is still browsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Medicine;
use crate::validation::validate_quantity;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One line in the cart: a medicine snapshot plus a quantity.
///
/// ## Price Freezing
/// Name, price and batch are captured when the line is created. If the
/// medicine is edited in inventory afterwards, the open cart keeps showing
/// what the customer was quoted.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    medicine_id: String,
    name: String,
    batch_number: String,
    unit_price: Money,
    quantity: i64,
    #[ts(as = "String")]
    added_at: DateTime<Utc>,
}

impl CartLine {
    fn from_medicine(medicine: &Medicine, quantity: i64) -> Self {
        CartLine {
            medicine_id: medicine.id.clone(),
            name: medicine.name.clone(),
            batch_number: medicine.batch_number.clone(),
            unit_price: medicine.price,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Id of the medicine this line refers to.
    pub fn medicine_id(&self) -> &str {
        &self.medicine_id
    }

    /// Medicine name as quoted when the line was added.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Batch number snapshotted at add-time.
    pub fn batch_number(&self) -> &str {
        &self.batch_number
    }

    /// Unit price as quoted when the line was added.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Quantity on the line. Always > 0 while the line is in a cart.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// When the line was first added.
    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart. Lines keep insertion order for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds one unit of a medicine, incrementing an existing line if present.
    pub fn add_item(&mut self, medicine: &Medicine) -> CoreResult<()> {
        self.add_item_qty(medicine, 1)
    }

    /// Adds `quantity` units of a medicine.
    ///
    /// ## Behavior
    /// - Medicine already in cart: quantity increases (capped)
    /// - Medicine not in cart: new line with a fresh snapshot
    pub fn add_item_qty(&mut self, medicine: &Medicine, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.medicine_id == medicine.id)
        {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.lines.push(CartLine::from_medicine(medicine, quantity));
        Ok(())
    }

    /// Changes a line's quantity by a signed delta.
    ///
    /// ## Behavior
    /// - New quantity is clamped at 0; a line reaching 0 is removed
    /// - Unknown medicine id: silent no-op (the +/- buttons on the sales
    ///   screen can race a removal; that must not surface as an error)
    /// - Exceeding the per-line cap is the only failure
    pub fn change_quantity(&mut self, medicine_id: &str, delta: i64) -> CoreResult<()> {
        let Some(index) = self
            .lines
            .iter()
            .position(|l| l.medicine_id == medicine_id)
        else {
            return Ok(());
        };

        let new_qty = (self.lines[index].quantity + delta).max(0);
        if new_qty > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: new_qty,
                max: MAX_ITEM_QUANTITY,
            });
        }

        if new_qty == 0 {
            self.lines.remove(index);
        } else {
            self.lines[index].quantity = new_qty;
        }
        Ok(())
    }

    /// Removes a line entirely. Returns whether a line was removed.
    pub fn remove_item(&mut self, medicine_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.medicine_id != medicine_id);
        self.lines.len() != before
    }

    /// Empties the cart. Called after a successful finalize, or on cancel.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Cart total, recomputed from the lines on every call.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// The lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
