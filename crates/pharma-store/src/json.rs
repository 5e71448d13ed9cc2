//! # JSON Snapshot Store
//!
//! A [`PharmacyStore`] persisting to two JSON files under a data directory:
//!
//! ```text
//! <dir>/medicines.json   full medicine list, rewritten on save
//! <dir>/sales.json       sale history, appended on each checkout
//! ```
//!
//! A whole-file rewrite per save is deliberate: the history of a single
//! pharmacy terminal stays small, and one file per collection keeps the
//! format inspectable. A real database sits behind the same trait when the
//! system outgrows this.

use std::fs;
use std::path::{Path, PathBuf};

use pharma_core::{Medicine, Sale};
use tracing::debug;

use crate::error::StoreResult;
use crate::PharmacyStore;

const MEDICINES_FILE: &str = "medicines.json";
const SALES_FILE: &str = "sales.json";

/// Store backed by JSON snapshot files.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "opened json store");
        Ok(JsonFileStore { dir })
    }

    /// The directory this store writes under.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_list<T: serde::de::DeserializeOwned>(&self, file: &str) -> StoreResult<Vec<T>> {
        let path = self.dir.join(file);
        if !path.exists() {
            // Fresh install: nothing saved yet.
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_list<T: serde::Serialize>(&self, file: &str, items: &[T]) -> StoreResult<()> {
        let path = self.dir.join(file);
        let contents = serde_json::to_string_pretty(items)?;
        fs::write(&path, contents)?;
        Ok(())
    }
}

impl PharmacyStore for JsonFileStore {
    fn load_medicines(&self) -> StoreResult<Vec<Medicine>> {
        let medicines = self.read_list(MEDICINES_FILE)?;
        debug!(count = medicines.len(), "loaded medicines");
        Ok(medicines)
    }

    fn save_medicines(&mut self, medicines: &[Medicine]) -> StoreResult<()> {
        debug!(count = medicines.len(), "saving medicines");
        self.write_list(MEDICINES_FILE, medicines)
    }

    fn append_sale(&mut self, sale: &Sale) -> StoreResult<()> {
        debug!(transaction_id = %sale.transaction_id(), "appending sale");
        let mut sales = self.read_list::<Sale>(SALES_FILE)?;
        sales.push(sale.clone());
        self.write_list(SALES_FILE, &sales)
    }

    fn load_sales(&self) -> StoreResult<Vec<Sale>> {
        let sales = self.read_list(SALES_FILE)?;
        debug!(count = sales.len(), "loaded sales");
        Ok(sales)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
