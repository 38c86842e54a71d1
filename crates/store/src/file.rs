//! File-backed store: two independent JSON documents under one data
//! directory, written via temp-file-then-rename. The live files are never
//! opened for writing, so a crash mid-write cannot truncate them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec::{BillsSnapshot, InventorySnapshot};
use crate::{StateStore, StoreError};

/// File name of the inventory document inside the data directory.
pub const INVENTORY_FILE: &str = "inventory.json";
/// File name of the bill ledger document inside the data directory.
pub const BILLS_FILE: &str = "bills.json";

/// Production store: persists both snapshots as JSON files.
#[derive(Debug, Clone)]
pub struct FileStore {
    inventory_path: PathBuf,
    bills_path: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            inventory_path: data_dir.join(INVENTORY_FILE),
            bills_path: data_dir.join(BILLS_FILE),
        }
    }

    pub fn inventory_path(&self) -> &Path {
        &self.inventory_path
    }

    pub fn bills_path(&self) -> &Path {
        &self.bills_path
    }

    fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(path, e)),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::corrupt(path, e.to_string()))
    }

    fn encode<T: Serialize>(path: &Path, snapshot: &T) -> Result<Vec<u8>, StoreError> {
        let mut bytes = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| StoreError::corrupt(path, e.to_string()))?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Write the serialized document to a sibling temp file.
    fn stage(path: &Path, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let staged = staging_path(path);
        fs::write(&staged, bytes).map_err(|e| StoreError::io(&staged, e))?;
        Ok(staged)
    }

    /// Atomically move a staged document over the live file.
    fn promote(staged: &Path, path: &Path) -> Result<(), StoreError> {
        fs::rename(staged, path).map_err(|e| StoreError::io(path, e))
    }

    fn write_document<T: Serialize>(path: &Path, snapshot: &T) -> Result<(), StoreError> {
        let bytes = Self::encode(path, snapshot)?;
        let staged = Self::stage(path, &bytes)?;
        Self::promote(&staged, path)
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

impl StateStore for FileStore {
    fn load_inventory(&self) -> Result<InventorySnapshot, StoreError> {
        let snapshot = match Self::read_document::<InventorySnapshot>(&self.inventory_path)? {
            Some(snapshot) => snapshot,
            None => return Ok(InventorySnapshot::default()),
        };
        snapshot
            .validate()
            .map_err(|reason| StoreError::corrupt(&self.inventory_path, reason))?;
        tracing::debug!(
            path = %self.inventory_path.display(),
            products = snapshot.products.len(),
            "loaded inventory"
        );
        Ok(snapshot)
    }

    fn load_bills(&self) -> Result<BillsSnapshot, StoreError> {
        let snapshot = match Self::read_document::<BillsSnapshot>(&self.bills_path)? {
            Some(snapshot) => snapshot,
            None => return Ok(BillsSnapshot::default()),
        };
        snapshot
            .validate()
            .map_err(|reason| StoreError::corrupt(&self.bills_path, reason))?;
        tracing::debug!(
            path = %self.bills_path.display(),
            bills = snapshot.bills.len(),
            "loaded bill ledger"
        );
        Ok(snapshot)
    }

    fn save_inventory(&self, snapshot: &InventorySnapshot) -> Result<(), StoreError> {
        Self::write_document(&self.inventory_path, snapshot)?;
        tracing::debug!(
            path = %self.inventory_path.display(),
            products = snapshot.products.len(),
            "saved inventory"
        );
        Ok(())
    }

    fn save_bills(&self, snapshot: &BillsSnapshot) -> Result<(), StoreError> {
        Self::write_document(&self.bills_path, snapshot)?;
        tracing::debug!(
            path = %self.bills_path.display(),
            bills = snapshot.bills.len(),
            "saved bill ledger"
        );
        Ok(())
    }

    fn save_both(
        &self,
        inventory: &InventorySnapshot,
        bills: &BillsSnapshot,
    ) -> Result<(), StoreError> {
        // Serialize and stage everything before promoting anything, so a
        // failure up to this point leaves both live files untouched.
        let inventory_bytes = Self::encode(&self.inventory_path, inventory)?;
        let bills_bytes = Self::encode(&self.bills_path, bills)?;

        let staged_inventory = Self::stage(&self.inventory_path, &inventory_bytes)?;
        let staged_bills = match Self::stage(&self.bills_path, &bills_bytes) {
            Ok(staged) => staged,
            Err(e) => {
                let _ = fs::remove_file(&staged_inventory);
                return Err(e);
            }
        };

        Self::promote(&staged_inventory, &self.inventory_path)?;
        Self::promote(&staged_bills, &self.bills_path)?;
        tracing::debug!(
            products = inventory.products.len(),
            bills = bills.bills.len(),
            "saved inventory and bill ledger"
        );
        Ok(())
    }
}
