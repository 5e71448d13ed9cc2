//! # Catalog
//!
//! The collection of sellable medicines and their stock levels.
//!
//! ## Stock Write Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Who May Write Medicine.stock                        │
//! │                                                                         │
//! │  Sale finalization ──► Catalog::commit_sale (crate-internal)            │
//! │                        validate every line, then decrement as one unit  │
//! │                                                                         │
//! │  Inventory edits ────► Catalog::insert / apply_adjustment               │
//! │                        explicit, audited, never mid-sale                │
//! │                                                                         │
//! │  Everything else reads through &Medicine and cannot write.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::cart::CartLine;
use crate::error::{CoreError, CoreResult, StockShortage};
use crate::types::{Medicine, StockAdjustment};
use crate::validation::validate_search_query;

/// The medicine catalog, keyed by medicine id.
///
/// A `BTreeMap` keeps iteration deterministic, so searches and reports come
/// out in a stable order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    medicines: BTreeMap<String, Medicine>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog {
            medicines: BTreeMap::new(),
        }
    }

    /// Builds a catalog from a medicine list, validating each record.
    ///
    /// Used when loading from the persistence layer; a malformed record
    /// rejects the whole load rather than entering the catalog half-checked.
    pub fn from_medicines(medicines: Vec<Medicine>) -> CoreResult<Self> {
        let mut catalog = Catalog::new();
        for medicine in medicines {
            catalog.insert(medicine)?;
        }
        Ok(catalog)
    }

    /// Inserts or replaces a medicine (the inventory-edit path).
    pub fn insert(&mut self, medicine: Medicine) -> CoreResult<()> {
        medicine.validate()?;
        self.medicines.insert(medicine.id.clone(), medicine);
        Ok(())
    }

    /// Removes a medicine from the catalog, returning it if present.
    pub fn remove(&mut self, medicine_id: &str) -> Option<Medicine> {
        self.medicines.remove(medicine_id)
    }

    /// Looks up a medicine by id.
    pub fn get(&self, medicine_id: &str) -> Option<&Medicine> {
        self.medicines.get(medicine_id)
    }

    /// Number of medicines in the catalog.
    pub fn len(&self) -> usize {
        self.medicines.len()
    }

    /// Whether the catalog holds no medicines.
    pub fn is_empty(&self) -> bool {
        self.medicines.is_empty()
    }

    /// Iterates over all medicines in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Medicine> {
        self.medicines.values()
    }

    /// Case-insensitive search across name, generic name and barcode.
    ///
    /// An empty query lists the whole catalog, matching the search box on
    /// the sales screen.
    pub fn search(&self, query: &str) -> CoreResult<Vec<&Medicine>> {
        let query = validate_search_query(query)?.to_lowercase();

        if query.is_empty() {
            return Ok(self.iter().collect());
        }

        Ok(self
            .iter()
            .filter(|m| {
                m.name.to_lowercase().contains(&query)
                    || m.generic_name.to_lowercase().contains(&query)
                    || m.barcode.contains(&query)
            })
            .collect())
    }

    /// Medicines at or below their reorder level.
    pub fn low_stock(&self) -> Vec<&Medicine> {
        self.iter().filter(|m| m.is_low_stock()).collect()
    }

    /// Medicines whose batch expires on or before `today + days`.
    ///
    /// Already-expired batches are included; they need attention most.
    pub fn expiring_within(&self, days: u64, today: NaiveDate) -> Vec<&Medicine> {
        let horizon = today
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX);
        self.iter()
            .filter(|m| m.expiry_date <= horizon)
            .collect()
    }

    /// Applies a manual stock adjustment.
    ///
    /// Additions increase stock; reductions, expiry pulls and damage
    /// write-offs decrease it and are rejected when they would take stock
    /// below zero.
    pub fn apply_adjustment(&mut self, adjustment: &StockAdjustment) -> CoreResult<()> {
        let medicine = self
            .medicines
            .get_mut(&adjustment.medicine_id)
            .ok_or_else(|| CoreError::MedicineNotFound(adjustment.medicine_id.clone()))?;

        if adjustment.kind.is_increase() {
            medicine.stock += adjustment.quantity;
        } else {
            if adjustment.quantity > medicine.stock {
                return Err(CoreError::AdjustmentExceedsStock {
                    medicine_id: adjustment.medicine_id.clone(),
                    quantity: adjustment.quantity,
                    available: medicine.stock,
                });
            }
            medicine.stock -= adjustment.quantity;
        }

        Ok(())
    }

    /// Validates and commits a sale's stock decrements as one unit.
    ///
    /// Check-then-decrement runs under a single `&mut self` borrow: either
    /// every line is covered by current stock and all decrements apply, or
    /// the error reports every short line and nothing changes.
    pub(crate) fn commit_sale(&mut self, lines: &[CartLine]) -> CoreResult<()> {
        // Pass 1: every line must resolve, with enough stock behind it.
        let mut shortages = Vec::new();
        for line in lines {
            let medicine = self
                .medicines
                .get(line.medicine_id())
                .ok_or_else(|| CoreError::MedicineNotFound(line.medicine_id().to_string()))?;
            if line.quantity() > medicine.stock {
                shortages.push(StockShortage {
                    medicine_id: medicine.id.clone(),
                    medicine_name: medicine.name.clone(),
                    requested: line.quantity(),
                    available: medicine.stock,
                });
            }
        }
        if !shortages.is_empty() {
            return Err(CoreError::InsufficientStock(shortages));
        }

        // Pass 2: all lines verified, decrement. Lines are unique per
        // medicine id (cart invariant), so each entry is hit once.
        for line in lines {
            if let Some(medicine) = self.medicines.get_mut(line.medicine_id()) {
                medicine.stock -= line.quantity();
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::StockAdjustmentKind;

    fn medicine(id: &str, name: &str, stock: i64) -> Medicine {
        Medicine {
            id: id.to_string(),
            name: name.to_string(),
            generic_name: "Acetaminophen".to_string(),
            barcode: "123456789012".to_string(),
            manufacturer: "PharmaCo".to_string(),
            category: "Pain Relief".to_string(),
            dosage_form: "Tablet".to_string(),
            strength: "500mg".to_string(),
            price: Money::from_cents(599),
            stock,
            reorder_level: 10,
            batch_number: "BAT123".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2027, 6, 30).unwrap(),
            location: "Shelf A1".to_string(),
            supplier: "MedSupply Inc".to_string(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut catalog = Catalog::new();
        catalog.insert(medicine("m1", "Paracetamol 500mg", 85)).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("m1").unwrap().stock, 85);
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut catalog = Catalog::new();
        catalog.insert(medicine("m1", "Paracetamol 500mg", 85)).unwrap();
        catalog.insert(medicine("m1", "Paracetamol 500mg", 40)).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("m1").unwrap().stock, 40);
    }

    #[test]
    fn test_insert_rejects_invalid() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert(medicine("", "Paracetamol 500mg", 85)).is_err());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_search_matches_name_generic_and_barcode() {
        let mut catalog = Catalog::new();
        catalog.insert(medicine("m1", "Paracetamol 500mg", 85)).unwrap();
        catalog.insert(medicine("m2", "Ibuprofen 200mg", 50)).unwrap();

        assert_eq!(catalog.search("paraceta").unwrap().len(), 1);
        assert_eq!(catalog.search("ACETAMINOPHEN").unwrap().len(), 2);
        assert_eq!(catalog.search("123456789012").unwrap().len(), 2);
        assert_eq!(catalog.search("amoxicillin").unwrap().len(), 0);
        // Empty query lists everything
        assert_eq!(catalog.search("").unwrap().len(), 2);
    }

    #[test]
    fn test_low_stock() {
        let mut catalog = Catalog::new();
        catalog.insert(medicine("m1", "Paracetamol 500mg", 10)).unwrap();
        catalog.insert(medicine("m2", "Ibuprofen 200mg", 50)).unwrap();

        let low = catalog.low_stock();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].id, "m1");
    }

    #[test]
    fn test_expiring_within() {
        let mut catalog = Catalog::new();
        catalog.insert(medicine("m1", "Paracetamol 500mg", 10)).unwrap();

        let today = NaiveDate::from_ymd_opt(2027, 6, 10).unwrap();
        assert_eq!(catalog.expiring_within(30, today).len(), 1);
        assert_eq!(catalog.expiring_within(5, today).len(), 0);

        // Already expired batches are still reported
        let later = NaiveDate::from_ymd_opt(2027, 8, 1).unwrap();
        assert_eq!(catalog.expiring_within(30, later).len(), 1);
    }

    #[test]
    fn test_adjustment_addition_and_reduction() {
        let mut catalog = Catalog::new();
        catalog.insert(medicine("m1", "Paracetamol 500mg", 10)).unwrap();

        let received =
            StockAdjustment::new("m1", StockAdjustmentKind::Addition, 40, "delivery", "admin", "BAT124")
                .unwrap();
        catalog.apply_adjustment(&received).unwrap();
        assert_eq!(catalog.get("m1").unwrap().stock, 50);

        let damaged =
            StockAdjustment::new("m1", StockAdjustmentKind::Damage, 5, "dropped box", "admin", "BAT124")
                .unwrap();
        catalog.apply_adjustment(&damaged).unwrap();
        assert_eq!(catalog.get("m1").unwrap().stock, 45);
    }

    #[test]
    fn test_adjustment_cannot_take_stock_negative() {
        let mut catalog = Catalog::new();
        catalog.insert(medicine("m1", "Paracetamol 500mg", 3)).unwrap();

        let pull =
            StockAdjustment::new("m1", StockAdjustmentKind::Expiry, 5, "expired", "admin", "BAT123")
                .unwrap();
        let err = catalog.apply_adjustment(&pull).unwrap_err();
        assert!(matches!(err, CoreError::AdjustmentExceedsStock { .. }));
        assert_eq!(catalog.get("m1").unwrap().stock, 3);
    }

    #[test]
    fn test_adjustment_unknown_medicine() {
        let mut catalog = Catalog::new();
        let pull =
            StockAdjustment::new("ghost", StockAdjustmentKind::Reduction, 1, "count", "admin", "B")
                .unwrap();
        assert!(matches!(
            catalog.apply_adjustment(&pull),
            Err(CoreError::MedicineNotFound(_))
        ));
    }
}
