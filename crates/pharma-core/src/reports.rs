//! # Reporting
//!
//! Pure aggregation over the catalog and the sale history: the numbers
//! behind the dashboard tiles and the reports page. No mutation, no I/O.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::money::Money;
use crate::sale::Sale;

/// How far ahead the expiry tile looks.
const EXPIRY_HORIZON_DAYS: u64 = 30;

// =============================================================================
// Dashboard
// =============================================================================

/// One entry of the top-selling list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TopSeller {
    /// Medicine name as recorded on the sales.
    pub medicine_name: String,
    /// Units sold across the history.
    pub quantity: i64,
    /// Revenue those units brought in.
    pub revenue: Money,
}

/// The dashboard tile numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardStats {
    /// All-time revenue.
    pub total_sales: Money,
    /// Revenue for `today`.
    pub todays_sales: Money,
    /// Revenue for the calendar month containing `today`.
    pub monthly_revenue: Money,
    /// Number of completed transactions, all time.
    pub total_transactions: usize,
    /// Medicines at or below their reorder level.
    pub low_stock_items: usize,
    /// Medicines whose batch expires within 30 days of `today`.
    pub expiring_items: usize,
    /// Best sellers by unit count, descending.
    pub top_selling: Vec<TopSeller>,
}

/// Computes the dashboard numbers for a given day.
pub fn dashboard_stats(catalog: &Catalog, sales: &[Sale], today: NaiveDate) -> DashboardStats {
    let total_sales: Money = sales.iter().map(Sale::total).sum();

    let todays_sales: Money = sales
        .iter()
        .filter(|s| s.created_at().date_naive() == today)
        .map(Sale::total)
        .sum();

    let monthly_revenue: Money = sales
        .iter()
        .filter(|s| {
            let date = s.created_at().date_naive();
            date.year() == today.year() && date.month() == today.month()
        })
        .map(Sale::total)
        .sum();

    DashboardStats {
        total_sales,
        todays_sales,
        monthly_revenue,
        total_transactions: sales.len(),
        low_stock_items: catalog.low_stock().len(),
        expiring_items: catalog.expiring_within(EXPIRY_HORIZON_DAYS, today).len(),
        top_selling: top_selling(sales, 5),
    }
}

/// Best sellers by unit count, ties broken by name for a stable order.
pub fn top_selling(sales: &[Sale], limit: usize) -> Vec<TopSeller> {
    let mut by_medicine: HashMap<&str, TopSeller> = HashMap::new();

    for sale in sales {
        for line in sale.lines() {
            let entry = by_medicine
                .entry(line.medicine_id())
                .or_insert_with(|| TopSeller {
                    medicine_name: line.name().to_string(),
                    quantity: 0,
                    revenue: Money::zero(),
                });
            entry.quantity += line.quantity();
            entry.revenue += line.line_total();
        }
    }

    let mut sellers: Vec<TopSeller> = by_medicine.into_values().collect();
    sellers.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then_with(|| a.medicine_name.cmp(&b.medicine_name))
    });
    sellers.truncate(limit);
    sellers
}

/// Revenue over an inclusive date range (the reports page query).
pub fn revenue_between(sales: &[Sale], from: NaiveDate, to: NaiveDate) -> Money {
    sales
        .iter()
        .filter(|s| {
            let date = s.created_at().date_naive();
            date >= from && date <= to
        })
        .map(Sale::total)
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::sale::SaleFinalizer;
    use crate::types::{Medicine, PaymentInfo};
    use chrono::Utc;

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

    fn sell(
        finalizer: &mut SaleFinalizer,
        catalog: &mut Catalog,
        medicine: &Medicine,
        qty: i64,
    ) -> Sale {
        let mut cart = Cart::new();
        cart.add_item_qty(medicine, qty).unwrap();
        finalizer
            .finalize(catalog, &cart, PaymentInfo::cash("amina"))
            .unwrap()
    }

    #[test]
    fn test_dashboard_stats() {
        let a = medicine("a", "Paracetamol 500mg", 599, 8); // low stock
        let b = medicine("b", "Amoxicillin 250mg", 1000, 40);
        let mut catalog = Catalog::from_medicines(vec![a.clone(), b.clone()]).unwrap();
        let mut finalizer = SaleFinalizer::new();

        let sales = vec![
            sell(&mut finalizer, &mut catalog, &a, 2),
            sell(&mut finalizer, &mut catalog, &b, 1),
        ];

        let today = Utc::now().date_naive();
        let stats = dashboard_stats(&catalog, &sales, today);

        assert_eq!(stats.total_sales.cents(), 2198);
        assert_eq!(stats.todays_sales.cents(), 2198);
        assert_eq!(stats.monthly_revenue.cents(), 2198);
        assert_eq!(stats.total_transactions, 2);
        assert_eq!(stats.low_stock_items, 1);
        assert_eq!(stats.top_selling.len(), 2);
        assert_eq!(stats.top_selling[0].medicine_name, "Paracetamol 500mg");
    }

    #[test]
    fn test_top_selling_orders_by_quantity() {
        let a = medicine("a", "Paracetamol 500mg", 599, 100);
        let b = medicine("b", "Amoxicillin 250mg", 1000, 100);
        let mut catalog = Catalog::from_medicines(vec![a.clone(), b.clone()]).unwrap();
        let mut finalizer = SaleFinalizer::new();

        let sales = vec![
            sell(&mut finalizer, &mut catalog, &a, 1),
            sell(&mut finalizer, &mut catalog, &b, 4),
            sell(&mut finalizer, &mut catalog, &a, 2),
        ];

        let top = top_selling(&sales, 5);
        assert_eq!(top[0].medicine_name, "Amoxicillin 250mg");
        assert_eq!(top[0].quantity, 4);
        assert_eq!(top[0].revenue.cents(), 4000);
        assert_eq!(top[1].medicine_name, "Paracetamol 500mg");
        assert_eq!(top[1].quantity, 3);

        assert_eq!(top_selling(&sales, 1).len(), 1);
    }

    #[test]
    fn test_revenue_between_is_inclusive() {
        let a = medicine("a", "Paracetamol 500mg", 599, 100);
        let mut catalog = Catalog::from_medicines(vec![a.clone()]).unwrap();
        let mut finalizer = SaleFinalizer::new();
        let sales = vec![sell(&mut finalizer, &mut catalog, &a, 1)];

        let today = Utc::now().date_naive();
        assert_eq!(revenue_between(&sales, today, today).cents(), 599);

        let yesterday = today.pred_opt().unwrap();
        assert_eq!(revenue_between(&sales, yesterday, yesterday).cents(), 0);
    }
}
