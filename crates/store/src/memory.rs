//! In-memory store for tests and ephemeral sessions. Nothing is durable.

use std::sync::RwLock;

use crate::codec::{BillsSnapshot, InventorySnapshot};
use crate::{StateStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    inventory: RwLock<InventorySnapshot>,
    bills: RwLock<BillsSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::io("<memory>", std::io::Error::other("lock poisoned"))
}

impl StateStore for MemoryStore {
    fn load_inventory(&self) -> Result<InventorySnapshot, StoreError> {
        Ok(self.inventory.read().map_err(|_| poisoned())?.clone())
    }

    fn load_bills(&self) -> Result<BillsSnapshot, StoreError> {
        Ok(self.bills.read().map_err(|_| poisoned())?.clone())
    }

    fn save_inventory(&self, snapshot: &InventorySnapshot) -> Result<(), StoreError> {
        *self.inventory.write().map_err(|_| poisoned())? = snapshot.clone();
        Ok(())
    }

    fn save_bills(&self, snapshot: &BillsSnapshot) -> Result<(), StoreError> {
        *self.bills.write().map_err(|_| poisoned())? = snapshot.clone();
        Ok(())
    }

    fn save_both(
        &self,
        inventory: &InventorySnapshot,
        bills: &BillsSnapshot,
    ) -> Result<(), StoreError> {
        self.save_inventory(inventory)?;
        self.save_bills(bills)
    }
}
