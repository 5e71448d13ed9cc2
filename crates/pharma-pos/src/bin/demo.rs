//! # Scripted Demo Session
//!
//! Seeds a small catalog and walks through a complete till workflow: search,
//! cart edits, a cash sale with a printed receipt, a prescription dispense
//! and the dashboard numbers afterwards.
//!
//! ## Usage
//! ```bash
//! cargo run -p pharma-pos --bin demo
//!
//! # With session logs
//! RUST_LOG=debug cargo run -p pharma-pos --bin demo
//! ```

use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use pharma_core::{
    new_entity_id, Medicine, Money, PaymentInfo, PaymentMethod, Prescription, PrescriptionItem,
    PrescriptionStatus,
};
use pharma_pos::{PosConfig, PosSession};
use pharma_store::MemoryStore;

/// Seed inventory: (name, generic, category, form, strength, price cents,
/// stock, reorder level, batch, expiry, location)
#[allow(clippy::type_complexity)]
const SEED: &[(&str, &str, &str, &str, &str, i64, i64, i64, &str, (i32, u32, u32), &str)] = &[
    (
        "Paracetamol 500mg",
        "Acetaminophen",
        "Pain Relief",
        "Tablet",
        "500mg",
        599,
        85,
        100,
        "BAT123",
        (2026, 12, 31),
        "Shelf A1",
    ),
    (
        "Amoxicillin 250mg",
        "Amoxicillin",
        "Antibiotics",
        "Capsule",
        "250mg",
        1000,
        40,
        30,
        "BAT201",
        (2027, 6, 30),
        "Shelf B2",
    ),
    (
        "Cetirizine 10mg",
        "Cetirizine",
        "Antihistamine",
        "Tablet",
        "10mg",
        300,
        120,
        50,
        "BAT310",
        (2027, 3, 31),
        "Shelf A3",
    ),
    (
        "ORS Sachet",
        "Oral Rehydration Salts",
        "Rehydration",
        "Powder",
        "20.5g",
        150,
        200,
        80,
        "BAT415",
        (2026, 10, 15),
        "Shelf C1",
    ),
];

fn seed_medicines() -> Vec<Medicine> {
    SEED.iter()
        .map(
            |(name, generic, category, form, strength, price, stock, reorder, batch, expiry, location)| {
                Medicine {
                    id: new_entity_id(),
                    name: name.to_string(),
                    generic_name: generic.to_string(),
                    barcode: format!("6001{:08}", price * 7 + stock),
                    manufacturer: "PharmaCo".to_string(),
                    category: category.to_string(),
                    dosage_form: form.to_string(),
                    strength: strength.to_string(),
                    price: Money::from_cents(*price),
                    stock: *stock,
                    reorder_level: *reorder,
                    batch_number: batch.to_string(),
                    expiry_date: NaiveDate::from_ymd_opt(expiry.0, expiry.1, expiry.2)
                        .expect("seed expiry dates are valid"),
                    location: location.to_string(),
                    supplier: "MedSupply Inc".to_string(),
                }
            },
        )
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("PharmaCare POS Demo");
    println!("===================");
    println!();

    let medicines = seed_medicines();
    let store = MemoryStore::with_medicines(medicines);
    let mut session = PosSession::open(store, PosConfig::from_env())?;
    println!("✓ Session opened with {} medicines", session.catalog().len());

    // A customer asks for paracetamol and an antihistamine
    let hits = session.search_medicines("para")?;
    println!("✓ Search 'para': {} result(s)", hits.len());
    let paracetamol_id = hits[0].id.clone();
    let cetirizine_id = session.search_medicines("cetirizine")?[0].id.clone();

    session.add_to_cart(&paracetamol_id)?;
    session.add_to_cart(&paracetamol_id)?;
    session.add_to_cart(&cetirizine_id)?;
    // Customer changes their mind about the second paracetamol
    session.update_quantity(&paracetamol_id, -1)?;

    let totals = session.cart_totals();
    println!(
        "✓ Cart: {} line(s), {} unit(s), total {}",
        totals.line_count, totals.total_quantity, totals.total
    );

    let receipt = session.checkout(PaymentInfo::cash("amina"))?;
    println!("✓ Sale completed: {}", receipt.transaction_id);
    println!();
    print!("{}", receipt);
    println!();

    // A prescription arrives at the counter
    let amoxicillin_id = session.search_medicines("amox")?[0].id.clone();
    let mut rx = Prescription {
        id: new_entity_id(),
        prescription_number: "RX-0001".to_string(),
        patient_name: "Neema Joseph".to_string(),
        patient_id: "P-100".to_string(),
        doctor_name: "Dr. Mushi".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 8, 7).expect("valid date"),
        status: PrescriptionStatus::Pending,
        items: vec![PrescriptionItem {
            medicine_id: amoxicillin_id,
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
    rx.start_processing()?;

    session.begin_prescription(&rx)?;
    let receipt = session.checkout(PaymentInfo {
        method: PaymentMethod::Insurance,
        customer_name: Some(rx.patient_name.clone()),
        sold_by: "amina".to_string(),
    })?;
    rx.complete("amina")?;
    println!("✓ Prescription {} dispensed: {}", rx.prescription_number, receipt.transaction_id);

    let stats = session.dashboard();
    println!();
    println!("Dashboard");
    println!("  Today's sales:      {}", stats.todays_sales);
    println!("  Transactions:       {}", stats.total_transactions);
    println!("  Low stock items:    {}", stats.low_stock_items);
    println!("  Expiring (30 days): {}", stats.expiring_items);
    for seller in &stats.top_selling {
        println!(
            "  Top seller: {} ×{} ({})",
            seller.medicine_name, seller.quantity, seller.revenue
        );
    }

    println!();
    println!("✓ Demo complete");
    Ok(())
}
