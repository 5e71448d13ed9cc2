//! # Prescriptions
//!
//! Prescription records and the dispensing flow that feeds them into a cart.
//!
//! ## Status Transitions
//! ```text
//! Pending ──► Processing ──► Completed
//!    │             │
//!    └─────────────┴──────► Cancelled
//! ```
//! Any other move is rejected with `InvalidPrescriptionStatus`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};

// =============================================================================
// Status
// =============================================================================

/// Lifecycle state of a prescription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PrescriptionStatus {
    /// Received, not yet picked up by a pharmacist.
    #[default]
    Pending,
    /// A pharmacist is assembling the items.
    Processing,
    /// Dispensed and paid.
    Completed,
    /// Abandoned or rejected.
    Cancelled,
}

impl std::fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PrescriptionStatus::Pending => "pending",
            PrescriptionStatus::Processing => "processing",
            PrescriptionStatus::Completed => "completed",
            PrescriptionStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Prescription
// =============================================================================

/// One prescribed medicine with its directions.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PrescriptionItem {
    /// Medicine to dispense.
    pub medicine_id: String,
    /// Name as written on the prescription.
    pub medicine_name: String,
    /// Units to dispense.
    pub quantity: i64,
    /// Dosage, e.g. "1 tablet".
    pub dosage: String,
    /// Frequency, e.g. "3 times daily".
    pub frequency: String,
    /// Duration, e.g. "5 days".
    pub duration: String,
    /// Extra directions, e.g. "after meals".
    pub instructions: String,
}

/// A doctor's prescription registered at the counter.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Prescription {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Business number written on the paper form.
    pub prescription_number: String,
    /// Patient name.
    pub patient_name: String,
    /// Patient registry id.
    pub patient_id: String,
    /// Prescribing doctor.
    pub doctor_name: String,
    /// Date of issue.
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Lifecycle state.
    pub status: PrescriptionStatus,
    /// Prescribed items.
    pub items: Vec<PrescriptionItem>,
    /// Pharmacist notes.
    pub notes: Option<String>,
    /// Pharmacist who dispensed, set on completion.
    pub dispensed_by: Option<String>,
}

impl Prescription {
    fn invalid_status(&self, operation: &str) -> CoreError {
        CoreError::InvalidPrescriptionStatus {
            prescription_id: self.id.clone(),
            current_status: self.status.to_string(),
            operation: operation.to_string(),
        }
    }

    /// Moves a pending prescription into processing.
    pub fn start_processing(&mut self) -> CoreResult<()> {
        if self.status != PrescriptionStatus::Pending {
            return Err(self.invalid_status("start processing"));
        }
        self.status = PrescriptionStatus::Processing;
        Ok(())
    }

    /// Marks a processing prescription as dispensed.
    pub fn complete(&mut self, dispensed_by: impl Into<String>) -> CoreResult<()> {
        if self.status != PrescriptionStatus::Processing {
            return Err(self.invalid_status("complete"));
        }
        self.status = PrescriptionStatus::Completed;
        self.dispensed_by = Some(dispensed_by.into());
        Ok(())
    }

    /// Cancels a prescription that has not been dispensed yet.
    pub fn cancel(&mut self) -> CoreResult<()> {
        match self.status {
            PrescriptionStatus::Pending | PrescriptionStatus::Processing => {
                self.status = PrescriptionStatus::Cancelled;
                Ok(())
            }
            _ => Err(self.invalid_status("cancel")),
        }
    }

    /// Builds a cart holding every prescribed item.
    ///
    /// Prices and batches come from the catalog at fill time, the same
    /// snapshot rules as a manual add. Stock is still only checked at
    /// finalize. Dispensing is allowed while pending or processing.
    pub fn fill_cart(&self, catalog: &Catalog) -> CoreResult<Cart> {
        match self.status {
            PrescriptionStatus::Pending | PrescriptionStatus::Processing => {}
            _ => return Err(self.invalid_status("dispense")),
        }

        let mut cart = Cart::new();
        for item in &self.items {
            let medicine = catalog
                .get(&item.medicine_id)
                .ok_or_else(|| CoreError::MedicineNotFound(item.medicine_id.clone()))?;
            cart.add_item_qty(medicine, item.quantity)?;
        }
        Ok(cart)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
