//! # POS Session
//!
//! One terminal session: the catalog, the open cart, the finalizer and the
//! store handle, plus the operations the sales screen drives.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Flow                                     │
//! │                                                                         │
//! │  Click medicine ─────► add_to_cart() ─────► cart line +1                │
//! │  +/- buttons ────────► update_quantity() ─► clamp at 0, drop at 0       │
//! │  "Complete Sale" ────► checkout()                                       │
//! │                          │                                              │
//! │                          ├── finalize (validate, decrement stock)       │
//! │                          ├── persist sale + medicine snapshot           │
//! │                          ├── clear cart                                 │
//! │                          └── render receipt ──► caller prints it        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is single-threaded and runs to completion; exclusive
//! `&mut self` borrows serialize the operations, so no locking exists at
//! this layer.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use pharma_core::{
    receipt, Cart, Catalog, CoreError, DashboardStats, Medicine, Money, PaymentInfo, Prescription,
    ReceiptView, Sale, SaleFinalizer, StockAdjustment,
};
use pharma_store::PharmacyStore;

use crate::config::PosConfig;
use crate::error::PosResult;

/// Cart totals summary for the cart panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartTotals {
    /// Distinct lines in the cart.
    pub line_count: usize,
    /// Units across all lines.
    pub total_quantity: i64,
    /// Grand total.
    pub total: Money,
}

/// A running point-of-sale session.
pub struct PosSession<S: PharmacyStore> {
    config: PosConfig,
    store: S,
    catalog: Catalog,
    cart: Cart,
    finalizer: SaleFinalizer,
    sales: Vec<Sale>,
    /// Prescription the open cart dispenses, if any.
    active_prescription: Option<String>,
}

impl<S: PharmacyStore> PosSession<S> {
    /// Opens a session: loads the catalog and sale history from the store.
    pub fn open(store: S, config: PosConfig) -> PosResult<Self> {
        let medicines = store.load_medicines()?;
        let catalog = Catalog::from_medicines(medicines)?;
        let sales = store.load_sales()?;

        info!(
            medicines = catalog.len(),
            sales = sales.len(),
            store_name = %config.store_name,
            "session opened"
        );

        Ok(PosSession {
            config,
            store,
            catalog,
            cart: Cart::new(),
            finalizer: SaleFinalizer::new(),
            sales,
            active_prescription: None,
        })
    }

    /// The catalog as currently loaded.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The open cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The sale history, oldest first.
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Searches medicines for the sales screen search box.
    pub fn search_medicines(&self, query: &str) -> PosResult<Vec<&Medicine>> {
        debug!(query = %query, "search_medicines");
        Ok(self.catalog.search(query)?)
    }

    /// Inserts or replaces a medicine and persists the inventory.
    pub fn upsert_medicine(&mut self, medicine: Medicine) -> PosResult<()> {
        debug!(medicine_id = %medicine.id, "upsert_medicine");
        self.catalog.insert(medicine)?;
        self.persist_medicines()?;
        Ok(())
    }

    /// Applies a manual stock adjustment and persists the inventory.
    pub fn adjust_stock(&mut self, adjustment: &StockAdjustment) -> PosResult<()> {
        debug!(
            medicine_id = %adjustment.medicine_id,
            kind = ?adjustment.kind,
            quantity = adjustment.quantity,
            "adjust_stock"
        );
        self.catalog.apply_adjustment(adjustment)?;
        self.persist_medicines()?;
        info!(medicine_id = %adjustment.medicine_id, "stock adjusted");
        Ok(())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds one unit of a medicine to the cart.
    pub fn add_to_cart(&mut self, medicine_id: &str) -> PosResult<()> {
        self.add_to_cart_qty(medicine_id, 1)
    }

    /// Adds `quantity` units of a medicine to the cart.
    pub fn add_to_cart_qty(&mut self, medicine_id: &str, quantity: i64) -> PosResult<()> {
        debug!(medicine_id = %medicine_id, quantity, "add_to_cart");
        let medicine = self
            .catalog
            .get(medicine_id)
            .ok_or_else(|| CoreError::MedicineNotFound(medicine_id.to_string()))?;
        self.cart.add_item_qty(medicine, quantity)?;
        Ok(())
    }

    /// Changes a cart line's quantity by a signed delta.
    pub fn update_quantity(&mut self, medicine_id: &str, delta: i64) -> PosResult<()> {
        debug!(medicine_id = %medicine_id, delta, "update_quantity");
        self.cart.change_quantity(medicine_id, delta)?;
        Ok(())
    }

    /// Removes a cart line entirely.
    pub fn remove_from_cart(&mut self, medicine_id: &str) {
        debug!(medicine_id = %medicine_id, "remove_from_cart");
        self.cart.remove_item(medicine_id);
    }

    /// Empties the cart and drops any prescription link.
    pub fn clear_cart(&mut self) {
        debug!("clear_cart");
        self.cart.clear();
        self.active_prescription = None;
    }

    /// Totals for the cart panel.
    pub fn cart_totals(&self) -> CartTotals {
        CartTotals {
            line_count: self.cart.line_count(),
            total_quantity: self.cart.total_quantity(),
            total: self.cart.total(),
        }
    }

    // =========================================================================
    // Prescriptions
    // =========================================================================

    /// Replaces the open cart with the items of a prescription.
    ///
    /// The resulting checkout is linked to the prescription id. Any manual
    /// cart in progress is discarded.
    pub fn begin_prescription(&mut self, prescription: &Prescription) -> PosResult<()> {
        debug!(prescription_id = %prescription.id, "begin_prescription");
        self.cart = prescription.fill_cart(&self.catalog)?;
        self.active_prescription = Some(prescription.id.clone());
        info!(
            prescription_id = %prescription.id,
            lines = self.cart.line_count(),
            "prescription loaded into cart"
        );
        Ok(())
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Finalizes the open cart into a sale and renders the receipt.
    ///
    /// On success: stock is decremented, the sale and the updated inventory
    /// are persisted, the cart is cleared. On any error the session state is
    /// exactly as before the call.
    pub fn checkout(&mut self, payment: PaymentInfo) -> PosResult<ReceiptView> {
        debug!(lines = self.cart.line_count(), "checkout");

        let sale = self.finalizer.finalize_with_link(
            &mut self.catalog,
            &self.cart,
            payment,
            self.active_prescription.clone(),
        )?;

        // Sale first, inventory second: a sale on file with a stale stock
        // snapshot is recoverable, the reverse is a silent stock leak.
        self.store.append_sale(&sale)?;
        self.persist_medicines()?;

        info!(
            transaction_id = %sale.transaction_id(),
            total = %sale.total(),
            lines = sale.lines().len(),
            "sale completed"
        );

        self.cart.clear();
        self.active_prescription = None;

        let view = receipt::render(&sale, &self.config.store_identity());
        self.sales.push(sale);
        Ok(view)
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Dashboard numbers as of today.
    pub fn dashboard(&self) -> DashboardStats {
        pharma_core::dashboard_stats(&self.catalog, &self.sales, Utc::now().date_naive())
    }

    fn persist_medicines(&mut self) -> PosResult<()> {
        let medicines: Vec<Medicine> = self.catalog.iter().cloned().collect();
        self.store.save_medicines(&medicines)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PosError;
    use chrono::NaiveDate;
    use pharma_core::{PaymentMethod, PrescriptionItem, PrescriptionStatus};
    use pharma_store::MemoryStore;

    fn medicine(id: &str, name: &str, price_cents: i64, stock: i64) -> Medicine {
        Medicine {
            id: id.to_string(),
            name: name.to_string(),
            generic_name: "Generic".to_string(),
            barcode: "123456789012".to_string(),
            manufacturer: "PharmaCo".to_string(),
            category: "Pain Relief".to_string(),
            dosage_form: "Tablet".to_string(),
            strength: "500mg".to_string(),
            price: Money::from_cents(price_cents),
            stock,
            reorder_level: 10,
            batch_number: "BAT123".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2027, 12, 31).unwrap(),
            location: "Shelf A1".to_string(),
            supplier: "MedSupply Inc".to_string(),
        }
    }

    fn session() -> PosSession<MemoryStore> {
        let store = MemoryStore::with_medicines(vec![
            medicine("a", "Paracetamol 500mg", 599, 85),
            medicine("b", "Amoxicillin 250mg", 1000, 40),
        ]);
        PosSession::open(store, PosConfig::default()).unwrap()
    }

    #[test]
    fn test_open_loads_catalog() {
        let session = session();
        assert_eq!(session.catalog().len(), 2);
        assert!(session.cart().is_empty());
        assert!(session.sales().is_empty());
    }

    #[test]
    fn test_full_checkout_flow() {
        let mut session = session();

        session.add_to_cart("a").unwrap();
        session.add_to_cart("a").unwrap();
        session.add_to_cart("b").unwrap();
        assert_eq!(session.cart_totals().total.cents(), 2198);

        let receipt = session.checkout(PaymentInfo::cash("amina")).unwrap();

        assert_eq!(receipt.total, "Tsh.21.98");
        assert_eq!(receipt.store_name, "PharmaCare");
        assert!(session.cart().is_empty());
        assert_eq!(session.catalog().get("a").unwrap().stock, 83);
        assert_eq!(session.catalog().get("b").unwrap().stock, 39);
        assert_eq!(session.sales().len(), 1);
    }

    #[test]
    fn test_checkout_persists_sale_and_inventory() {
        let mut session = session();
        session.add_to_cart("a").unwrap();
        session.checkout(PaymentInfo::cash("amina")).unwrap();

        // The store saw the sale and the decremented stock.
        let stored_sales = session.store.load_sales().unwrap();
        assert_eq!(stored_sales.len(), 1);
        let stored_medicines = session.store.load_medicines().unwrap();
        let a = stored_medicines.iter().find(|m| m.id == "a").unwrap();
        assert_eq!(a.stock, 84);
    }

    #[test]
    fn test_checkout_failure_leaves_everything_unchanged() {
        let mut session = session();
        session.add_to_cart_qty("a", 2).unwrap();
        session.add_to_cart_qty("b", 50).unwrap(); // only 40 in stock

        let err = session.checkout(PaymentInfo::cash("amina")).unwrap_err();
        assert!(matches!(
            err,
            PosError::Core(CoreError::InsufficientStock(_))
        ));

        assert_eq!(session.cart_totals().line_count, 2);
        assert_eq!(session.catalog().get("a").unwrap().stock, 85);
        assert_eq!(session.catalog().get("b").unwrap().stock, 40);
        assert!(session.sales().is_empty());
        assert_eq!(session.store.sale_count(), 0);
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut session = session();
        assert!(matches!(
            session.checkout(PaymentInfo::cash("amina")),
            Err(PosError::Core(CoreError::EmptyCart))
        ));
    }

    #[test]
    fn test_update_quantity_and_remove() {
        let mut session = session();
        session.add_to_cart("a").unwrap();
        session.update_quantity("a", 2).unwrap();
        assert_eq!(session.cart_totals().total_quantity, 3);

        session.update_quantity("a", -3).unwrap();
        assert!(session.cart().is_empty());

        // Unknown id stays silent, like the sales screen expects
        session.update_quantity("ghost", 1).unwrap();
    }

    #[test]
    fn test_prescription_dispense_links_sale() {
        let mut session = session();

        let mut rx = Prescription {
            id: "rx-1".to_string(),
            prescription_number: "RX-0001".to_string(),
            patient_name: "Neema Joseph".to_string(),
            patient_id: "P-100".to_string(),
            doctor_name: "Dr. Mushi".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
            status: PrescriptionStatus::Pending,
            items: vec![PrescriptionItem {
                medicine_id: "b".to_string(),
                medicine_name: "Amoxicillin 250mg".to_string(),
                quantity: 15,
                dosage: "1 capsule".to_string(),
                frequency: "3 times daily".to_string(),
                duration: "5 days".to_string(),
                instructions: "after meals".to_string(),
            }],
            notes: None,
            dispensed_by: None,
        };
        rx.start_processing().unwrap();

        session.begin_prescription(&rx).unwrap();
        assert_eq!(session.cart_totals().total.cents(), 15_000);

        session
            .checkout(PaymentInfo {
                method: PaymentMethod::Insurance,
                customer_name: Some(rx.patient_name.clone()),
                sold_by: "amina".to_string(),
            })
            .unwrap();
        rx.complete("amina").unwrap();

        assert_eq!(session.sales()[0].prescription_id(), Some("rx-1"));
        assert_eq!(session.catalog().get("b").unwrap().stock, 25);
    }

    #[test]
    fn test_adjust_stock_persists() {
        let mut session = session();
        let adjustment = StockAdjustment::new(
            "a",
            pharma_core::StockAdjustmentKind::Damage,
            5,
            "dropped box",
            "admin",
            "BAT123",
        )
        .unwrap();

        session.adjust_stock(&adjustment).unwrap();
        assert_eq!(session.catalog().get("a").unwrap().stock, 80);

        let stored = session.store.load_medicines().unwrap();
        assert_eq!(stored.iter().find(|m| m.id == "a").unwrap().stock, 80);
    }

    #[test]
    fn test_dashboard_after_sales() {
        let mut session = session();
        session.add_to_cart("a").unwrap();
        session.checkout(PaymentInfo::cash("amina")).unwrap();

        let stats = session.dashboard();
        assert_eq!(stats.total_transactions, 1);
        assert_eq!(stats.todays_sales.cents(), 599);
    }
}
