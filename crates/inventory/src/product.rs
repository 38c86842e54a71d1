use serde::{Deserialize, Serialize};

use stockmate_core::{DomainError, DomainResult, ProductId};

/// Product record: one stock-keeping entry in the inventory store.
///
/// The identifier is assigned by the engine and never changes post-creation.
/// Stock is mutated only through [`crate::InventoryStore::update_quantity`],
/// which enforces the `quantity >= 0` invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub quantity: i64,
    /// Unit price in smallest currency unit (e.g., cents).
    pub price: u64,
    /// Reserved for future use; not populated by any current operation.
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Reserved for future use; not populated by any current operation.
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl Product {
    /// Validate and build a product record.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        quantity: i64,
        price: u64,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        Ok(Self {
            id,
            name,
            quantity,
            price,
            customer_name: None,
            phone_number: None,
        })
    }
}
