//! # pharma-core: Pure Business Logic for PharmaCare POS
//!
//! This crate is the **heart** of PharmaCare POS. It contains all business
//! logic as pure functions and plain objects with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     PharmaCare POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Front-end (single-page app)                    │   │
//! │  │    Search UI ──► Cart UI ──► Checkout UI ──► Receipt UI         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pharma-pos (session layer)                   │   │
//! │  │    add_to_cart, update_quantity, checkout, dashboard            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pharma-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │   sale    │  │  receipt  │  │   │
//! │  │   │ Medicine  │  │ CartLine  │  │ Finalizer │  │  render   │  │   │
//! │  │   │   stock   │  │  totals   │  │   Sale    │  │   view    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 pharma-store (persistence seam)                 │   │
//! │  │            load/save medicines, append/load sales               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Medicine, PaymentInfo, StockAdjustment)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - The medicine collection and its stock rules
//! - [`cart`] - The in-progress selection for one pending sale
//! - [`sale`] - Sale finalization and transaction identity
//! - [`receipt`] - Pure receipt projection
//! - [`reports`] - Dashboard and date-range aggregation
//! - [`prescription`] - Prescription records and dispensing
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation
//!
//! ## Design Principles
//!
//! 1. **Pure Logic**: Every operation acts only on the objects passed in
//! 2. **No I/O**: File system, network and database access are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Validate-then-act**: No failure path leaves partial state behind

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod prescription;
pub mod receipt;
pub mod reports;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pharma_core::Cart` instead of
// `use pharma_core::cart::Cart`.

pub use cart::{Cart, CartLine};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, StockShortage, ValidationError};
pub use money::Money;
pub use prescription::{Prescription, PrescriptionItem, PrescriptionStatus};
pub use receipt::{render, ReceiptLine, ReceiptView, StoreIdentity};
pub use reports::{dashboard_stats, revenue_between, top_selling, DashboardStats, TopSeller};
pub use sale::{Sale, SaleFinalizer, SaleLine, TransactionId, TransactionIdGenerator};
pub use types::{
    new_entity_id, Medicine, PaymentInfo, PaymentMethod, StockAdjustment, StockAdjustmentKind,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and keeps a single receipt printable.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single medicine in one cart line.
///
/// ## Business Reason
/// Catches keying mistakes (1000 instead of 10) before they reach a sale.
pub const MAX_ITEM_QUANTITY: i64 = 999;
