//! # pharma-pos: Session Orchestration for PharmaCare POS
//!
//! The layer the single-page front-end drives. A [`PosSession`] owns the
//! catalog, the open cart, the sale finalizer and a store handle, and exposes
//! the operations of the sales screen: search, cart edits, prescription
//! dispense, checkout, dashboard.
//!
//! Every business rule lives in `pharma-core`; every byte of persistence in
//! `pharma-store`. This crate only sequences them and logs what happened.

pub mod config;
pub mod error;
pub mod session;

pub use config::PosConfig;
pub use error::{PosError, PosResult};
pub use session::{CartTotals, PosSession};
