//! # Receipt Projection
//!
//! Pure projection of a finalized [`Sale`] into a printable view.
//!
//! [`render`] performs no mutation and no I/O; rendering the same sale twice
//! yields identical output. Turning the view into printer markup, PDF or
//! on-screen HTML is the front-end's job.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::sale::Sale;

// =============================================================================
// Store Identity
// =============================================================================

/// The business identity printed at the top of every receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StoreIdentity {
    /// Store name, first line of the header.
    pub name: String,

    /// Address lines under the name.
    pub address_lines: Vec<String>,

    /// Contact phone number.
    pub phone: String,

    /// Currency prefix used for every amount, e.g. `Tsh.`.
    pub currency_symbol: String,

    /// Lines printed under the totals.
    pub footer_lines: Vec<String>,
}

impl Default for StoreIdentity {
    fn default() -> Self {
        StoreIdentity {
            name: "PharmaCare".to_string(),
            address_lines: vec!["Tabata Street".to_string()],
            phone: "+255 613 004 338".to_string(),
            currency_symbol: "Tsh.".to_string(),
            footer_lines: vec![
                "Thank you for your purchase!".to_string(),
                "Please keep this receipt for your records.".to_string(),
            ],
        }
    }
}

impl StoreIdentity {
    /// Formats an amount with the store currency, two decimals.
    pub fn format_amount(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            self.currency_symbol,
            amount.major().abs(),
            amount.minor()
        )
    }
}

// =============================================================================
// Receipt View
// =============================================================================

/// One rendered line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptLine {
    /// Medicine name as sold.
    pub name: String,
    /// Quantity sold.
    pub quantity: i64,
    /// Unit price, formatted to 2 decimal places.
    pub unit_price: String,
    /// Line total, formatted to 2 decimal places.
    pub line_total: String,
}

/// A fully rendered receipt, ready for display or printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptView {
    /// Store name (header).
    pub store_name: String,
    /// Store address lines (header).
    pub address_lines: Vec<String>,
    /// Store phone (header).
    pub phone: String,
    /// Business transaction identifier.
    pub transaction_id: String,
    /// Sale timestamp, `YYYY-MM-DD HH:MM:SS` UTC.
    pub timestamp: String,
    /// The line items.
    pub lines: Vec<ReceiptLine>,
    /// Grand total, formatted.
    pub total: String,
    /// Payment method label.
    pub payment_method: String,
    /// Customer name when one was recorded.
    pub customer_name: Option<String>,
    /// User who rang up the sale.
    pub served_by: String,
    /// Footer lines.
    pub footer_lines: Vec<String>,
}

/// Renders a sale into a receipt view.
///
/// Stateless and idempotent: the output depends only on the sale and the
/// store identity passed in.
pub fn render(sale: &Sale, store: &StoreIdentity) -> ReceiptView {
    ReceiptView {
        store_name: store.name.clone(),
        address_lines: store.address_lines.clone(),
        phone: store.phone.clone(),
        transaction_id: sale.transaction_id().to_string(),
        timestamp: sale.created_at().format("%Y-%m-%d %H:%M:%S").to_string(),
        lines: sale
            .lines()
            .iter()
            .map(|line| ReceiptLine {
                name: line.name().to_string(),
                quantity: line.quantity(),
                unit_price: store.format_amount(line.unit_price()),
                line_total: store.format_amount(line.line_total()),
            })
            .collect(),
        total: store.format_amount(sale.total()),
        payment_method: sale.payment().method.to_string(),
        customer_name: sale.payment().customer_name.clone(),
        served_by: sale.payment().sold_by.clone(),
        footer_lines: store.footer_lines.clone(),
    }
}

/// Plain-text rendering, the shape a thermal printer would produce.
impl fmt::Display for ReceiptView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:^40}", self.store_name)?;
        for line in &self.address_lines {
            writeln!(f, "{:^40}", line)?;
        }
        writeln!(f, "{:^40}", format!("Phone: {}", self.phone))?;
        writeln!(f)?;
        writeln!(f, "Transaction ID: {}", self.transaction_id)?;
        writeln!(f, "Date: {}", self.timestamp)?;
        writeln!(f, "{}", "-".repeat(40))?;
        writeln!(f, "{:<18}{:>4}{:>9}{:>9}", "Item", "Qty", "Price", "Total")?;
        for line in &self.lines {
            let mut name = line.name.clone();
            name.truncate(18);
            writeln!(
                f,
                "{:<18}{:>4}{:>9}{:>9}",
                name, line.quantity, line.unit_price, line.line_total
            )?;
        }
        writeln!(f, "{}", "-".repeat(40))?;
        writeln!(f, "{:>40}", format!("Total: {}", self.total))?;
        writeln!(f, "Paid by: {}", self.payment_method)?;
        if let Some(customer) = &self.customer_name {
            writeln!(f, "Customer: {}", customer)?;
        }
        writeln!(f, "Served by: {}", self.served_by)?;
        writeln!(f)?;
        for line in &self.footer_lines {
            writeln!(f, "{:^40}", line)?;
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
    use crate::cart::Cart;
    use crate::catalog::Catalog;
    use crate::money::Money;
    use crate::sale::SaleFinalizer;
    use crate::types::{Medicine, PaymentInfo, PaymentMethod};
    use chrono::NaiveDate;

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

    fn finalized_sale() -> Sale {
        let a = medicine("a", "Paracetamol 500mg", 599, 85);
        let b = medicine("b", "Amoxicillin 250mg", 1000, 40);
        let mut catalog = Catalog::from_medicines(vec![a.clone(), b.clone()]).unwrap();

        let mut cart = Cart::new();
        cart.add_item_qty(&a, 2).unwrap();
        cart.add_item(&b).unwrap();

        SaleFinalizer::new()
            .finalize(
                &mut catalog,
                &cart,
                PaymentInfo {
                    method: PaymentMethod::Insurance,
                    customer_name: Some("Neema Joseph".to_string()),
                    sold_by: "amina".to_string(),
                },
            )
            .unwrap()
    }

    #[test]
    fn test_render_amounts_formatted_two_decimals() {
        let sale = finalized_sale();
        let view = render(&sale, &StoreIdentity::default());

        assert_eq!(view.lines[0].unit_price, "Tsh.5.99");
        assert_eq!(view.lines[0].line_total, "Tsh.11.98");
        assert_eq!(view.lines[1].line_total, "Tsh.10.00");
        assert_eq!(view.total, "Tsh.21.98");
        assert_eq!(view.payment_method, "Insurance");
        assert_eq!(view.customer_name.as_deref(), Some("Neema Joseph"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let sale = finalized_sale();
        let store = StoreIdentity::default();

        let first = render(&sale, &store);
        let second = render(&sale, &store);
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_render_header_carries_store_identity() {
        let sale = finalized_sale();
        let view = render(&sale, &StoreIdentity::default());

        assert_eq!(view.store_name, "PharmaCare");
        assert_eq!(view.address_lines, vec!["Tabata Street".to_string()]);
        assert_eq!(view.phone, "+255 613 004 338");
        assert!(view.transaction_id.starts_with("SALE-"));
    }

    #[test]
    fn test_plain_text_contains_every_line_and_total() {
        let sale = finalized_sale();
        let text = render(&sale, &StoreIdentity::default()).to_string();

        assert!(text.contains("PharmaCare"));
        assert!(text.contains("Paracetamol 500mg"));
        assert!(text.contains("Amoxicillin 250mg"));
        assert!(text.contains("Total: Tsh.21.98"));
        assert!(text.contains("Thank you for your purchase!"));
    }

    #[test]
    fn test_format_amount_negative() {
        let store = StoreIdentity::default();
        assert_eq!(store.format_amount(Money::from_cents(-550)), "-Tsh.5.50");
        assert_eq!(store.format_amount(Money::zero()), "Tsh.0.00");
    }
}
