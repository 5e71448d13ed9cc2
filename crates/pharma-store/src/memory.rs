//! # In-Memory Store
//!
//! A [`PharmacyStore`] that never touches disk. Used by tests and the demo
//! binary; also the starting point for a fresh session before any data
//! directory exists.

use pharma_core::{Medicine, Sale};

use crate::error::StoreResult;
use crate::PharmacyStore;

/// Store backed by plain vectors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    medicines: Vec<Medicine>,
    sales: Vec<Sale>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store pre-loaded with medicines.
    pub fn with_medicines(medicines: Vec<Medicine>) -> Self {
        MemoryStore {
            medicines,
            sales: Vec::new(),
        }
    }

    /// Number of sales recorded so far.
    pub fn sale_count(&self) -> usize {
        self.sales.len()
    }
}

impl PharmacyStore for MemoryStore {
    fn load_medicines(&self) -> StoreResult<Vec<Medicine>> {
        Ok(self.medicines.clone())
    }

    fn save_medicines(&mut self, medicines: &[Medicine]) -> StoreResult<()> {
        self.medicines = medicines.to_vec();
        Ok(())
    }

    fn append_sale(&mut self, sale: &Sale) -> StoreResult<()> {
        self.sales.push(sale.clone());
        Ok(())
    }

    fn load_sales(&self) -> StoreResult<Vec<Sale>> {
        Ok(self.sales.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pharma_core::{Cart, Catalog, Money, PaymentInfo, SaleFinalizer};

    fn medicine(id: &str) -> Medicine {
        Medicine {
            id: id.to_string(),
            name: format!("Medicine {}", id),
            generic_name: "Generic".to_string(),
            barcode: "123456789012".to_string(),
            manufacturer: "PharmaCo".to_string(),
            category: "Pain Relief".to_string(),
            dosage_form: "Tablet".to_string(),
            strength: "500mg".to_string(),
            price: Money::from_cents(599),
            stock: 100,
            reorder_level: 10,
            batch_number: "BAT123".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2027, 12, 31).unwrap(),
            location: "Shelf A1".to_string(),
            supplier: "MedSupply Inc".to_string(),
        }
    }

    #[test]
    fn test_medicines_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.load_medicines().unwrap().is_empty());

        store.save_medicines(&[medicine("m1"), medicine("m2")]).unwrap();
        assert_eq!(store.load_medicines().unwrap().len(), 2);
    }

    #[test]
    fn test_sales_append_in_order() {
        let m = medicine("m1");
        let mut catalog = Catalog::from_medicines(vec![m.clone()]).unwrap();
        let mut finalizer = SaleFinalizer::new();
        let mut store = MemoryStore::new();

        for _ in 0..2 {
            let mut cart = Cart::new();
            cart.add_item(&m).unwrap();
            let sale = finalizer
                .finalize(&mut catalog, &cart, PaymentInfo::cash("amina"))
                .unwrap();
            store.append_sale(&sale).unwrap();
        }

        let sales = store.load_sales().unwrap();
        assert_eq!(sales.len(), 2);
        assert_ne!(sales[0].transaction_id(), sales[1].transaction_id());
    }
}
