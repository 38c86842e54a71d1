//! `stockmate-engine` — the inventory/billing engine behind the presentation
//! boundary.
//!
//! [`InventoryManager`] is the sole owner of the inventory store and the bill
//! ledger. Every public operation validates its input, runs to completion
//! including persistence, and leaves in-memory and on-disk state in
//! agreement, also when persistence fails. The presentation layer holds an
//! explicit manager handle and calls nothing else.

pub mod error;
pub mod manager;

pub use error::EngineError;
pub use manager::InventoryManager;

pub use stockmate_billing::{Bill, BillLedger};
pub use stockmate_core::{BillId, DomainError, ProductId};
pub use stockmate_inventory::{InventoryStore, Product};
pub use stockmate_store::{FileStore, MemoryStore, StateStore, StoreError};
