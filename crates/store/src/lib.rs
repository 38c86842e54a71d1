//! `stockmate-store` — persistence gateway.
//!
//! Owns the serialized form of the inventory and the bill ledger: the
//! versioned file envelopes ([`codec`]), the production file-backed store
//! ([`file::FileStore`]), and an in-memory store for tests and ephemeral
//! sessions ([`memory::MemoryStore`]).

use std::path::PathBuf;

use thiserror::Error;

pub mod codec;
pub mod file;
pub mod memory;

pub use codec::{BillsSnapshot, InventorySnapshot, SCHEMA_VERSION};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Persistence error.
///
/// `Corrupt` means the stored data exists but cannot be trusted (unparsable,
/// wrong shape, unknown schema version). `Io` means the environment failed
/// (permissions, disk). Both are recoverable at the boundary; neither is a
/// validation outcome.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("corrupt data in {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("io failure on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Store abstraction for the engine's durable state.
///
/// Loading from an empty backend yields empty snapshots; saving overwrites
/// whole snapshots at once. `save_both` persists the paired mutation of
/// `create_bill` and must leave the previously stored state intact when it
/// fails.
pub trait StateStore {
    fn load_inventory(&self) -> Result<InventorySnapshot, StoreError>;

    fn load_bills(&self) -> Result<BillsSnapshot, StoreError>;

    fn save_inventory(&self, snapshot: &InventorySnapshot) -> Result<(), StoreError>;

    fn save_bills(&self, snapshot: &BillsSnapshot) -> Result<(), StoreError>;

    fn save_both(
        &self,
        inventory: &InventorySnapshot,
        bills: &BillsSnapshot,
    ) -> Result<(), StoreError>;
}
