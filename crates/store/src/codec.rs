//! Serialized form of the durable state.
//!
//! Each collection persists as one JSON document: a versioned envelope
//! holding the id counter and the flat records. Field order on disk follows
//! struct order, so repeated saves of the same state are byte-identical and
//! diffable; field order on read is irrelevant.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use stockmate_billing::Bill;
use stockmate_inventory::Product;

/// Version written into every envelope. Readers reject anything else.
pub const SCHEMA_VERSION: u32 = 1;

/// Envelope for the inventory file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub schema_version: u32,
    /// Next id to assign; monotonic, never rewound by removals.
    pub next_product_id: u64,
    pub products: Vec<Product>,
}

/// Envelope for the bill ledger file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillsSnapshot {
    pub schema_version: u32,
    /// Next id to assign; monotonic.
    pub next_bill_id: u64,
    pub bills: Vec<Bill>,
}

impl InventorySnapshot {
    pub fn new(next_product_id: u64, products: Vec<Product>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            next_product_id,
            products,
        }
    }

    /// Shape check beyond what deserialization enforces.
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(format!(
                "unsupported schema version {} (expected {SCHEMA_VERSION})",
                self.schema_version
            ));
        }
        let mut seen = HashSet::new();
        for product in &self.products {
            if !seen.insert(product.id) {
                return Err(format!("duplicate product id {}", product.id));
            }
            if product.quantity < 0 {
                return Err(format!(
                    "negative quantity {} on product id {}",
                    product.quantity, product.id
                ));
            }
        }
        Ok(())
    }
}

impl Default for InventorySnapshot {
    fn default() -> Self {
        Self::new(1, Vec::new())
    }
}

impl BillsSnapshot {
    pub fn new(next_bill_id: u64, bills: Vec<Bill>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            next_bill_id,
            bills,
        }
    }

    /// Shape check beyond what deserialization enforces.
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(format!(
                "unsupported schema version {} (expected {SCHEMA_VERSION})",
                self.schema_version
            ));
        }
        let mut seen = HashSet::new();
        for bill in &self.bills {
            if !seen.insert(bill.id) {
                return Err(format!("duplicate bill id {}", bill.id));
            }
            if bill.quantity <= 0 {
                return Err(format!(
                    "non-positive quantity {} on bill id {}",
                    bill.quantity, bill.id
                ));
            }
        }
        Ok(())
    }
}

impl Default for BillsSnapshot {
    fn default() -> Self {
        Self::new(1, Vec::new())
    }
}
