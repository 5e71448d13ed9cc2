//! # Session Configuration
//!
//! Configuration loaded once at session start.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`PHARMA_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization; the session never mutates it.

use pharma_core::StoreIdentity;
use serde::{Deserialize, Serialize};

/// Terminal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosConfig {
    /// Store name (displayed on receipts).
    pub store_name: String,

    /// Store address lines (for receipts).
    pub store_address: Vec<String>,

    /// Contact phone (for receipts).
    pub phone: String,

    /// Currency prefix for every printed amount.
    pub currency_symbol: String,

    /// Lines printed under the receipt totals.
    pub receipt_footer: Vec<String>,
}

impl Default for PosConfig {
    fn default() -> Self {
        PosConfig {
            store_name: "PharmaCare".to_string(),
            store_address: vec!["Tabata Street".to_string()],
            phone: "+255 613 004 338".to_string(),
            currency_symbol: "Tsh.".to_string(),
            receipt_footer: vec![
                "Thank you for your purchase!".to_string(),
                "Please keep this receipt for your records.".to_string(),
            ],
        }
    }
}

impl PosConfig {
    /// Creates a config from environment variables over defaults.
    ///
    /// ## Environment Variables
    /// - `PHARMA_STORE_NAME`: Override store name
    /// - `PHARMA_STORE_PHONE`: Override contact phone
    /// - `PHARMA_CURRENCY`: Override currency prefix
    pub fn from_env() -> Self {
        let mut config = PosConfig::default();

        if let Ok(name) = std::env::var("PHARMA_STORE_NAME") {
            config.store_name = name;
        }

        if let Ok(phone) = std::env::var("PHARMA_STORE_PHONE") {
            config.phone = phone;
        }

        if let Ok(currency) = std::env::var("PHARMA_CURRENCY") {
            config.currency_symbol = currency;
        }

        config
    }

    /// The receipt header identity this config describes.
    pub fn store_identity(&self) -> StoreIdentity {
        StoreIdentity {
            name: self.store_name.clone(),
            address_lines: self.store_address.clone(),
            phone: self.phone.clone(),
            currency_symbol: self.currency_symbol.clone(),
            footer_lines: self.receipt_footer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharma_core::Money;

    #[test]
    fn test_default_identity_matches_receipt_header() {
        let identity = PosConfig::default().store_identity();
        assert_eq!(identity.name, "PharmaCare");
        assert_eq!(identity.phone, "+255 613 004 338");
        assert_eq!(identity.format_amount(Money::from_cents(1234)), "Tsh.12.34");
    }
}
