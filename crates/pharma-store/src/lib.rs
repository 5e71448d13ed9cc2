//! # pharma-store: Persistence Seam for PharmaCare POS
//!
//! The core performs no I/O. This crate defines the one interface through
//! which medicines and sales reach durable storage, and two implementations:
//!
//! - [`MemoryStore`] - keeps everything in process memory (tests, demos)
//! - [`JsonFileStore`] - JSON snapshot files under a data directory, the
//!   stand-in for a real database
//!
//! The session layer calls the store at well-defined points: catalog load on
//! open, sale append + medicine save after a successful finalize, inventory
//! save after an edit. Nothing else touches storage.

pub mod error;
pub mod json;
pub mod memory;

pub use error::{StoreError, StoreResult};
pub use json::JsonFileStore;
pub use memory::MemoryStore;

use pharma_core::{Medicine, Sale};

/// Durable storage for the pharmacy's records.
///
/// Reads take `&self`, writes take `&mut self`; the single-threaded session
/// owns the store, so exclusive access is already guaranteed by borrowing.
pub trait PharmacyStore {
    /// Loads the full medicine list. An empty store yields an empty list.
    fn load_medicines(&self) -> StoreResult<Vec<Medicine>>;

    /// Replaces the stored medicine list with the given snapshot.
    fn save_medicines(&mut self, medicines: &[Medicine]) -> StoreResult<()>;

    /// Appends one finalized sale to the history.
    fn append_sale(&mut self, sale: &Sale) -> StoreResult<()>;

    /// Loads the full sale history, oldest first.
    fn load_sales(&self) -> StoreResult<Vec<Sale>>;
}
