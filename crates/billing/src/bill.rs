use serde::{Deserialize, Serialize};

use stockmate_core::{BillId, DomainError, DomainResult};

/// Bill record: one completed sale.
///
/// `product_name` is a snapshot of the product name at billing time, not a
/// reference, so the bill stays readable after the product is renamed or
/// removed. `total_price` is likewise fixed at creation and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub product_name: String,
    pub quantity: i64,
    /// Total in smallest currency unit (e.g., cents).
    pub total_price: u64,
}

impl Bill {
    /// Validate and build a bill record.
    pub fn new(
        id: BillId,
        product_name: impl Into<String>,
        quantity: i64,
        total_price: u64,
    ) -> DomainResult<Self> {
        if quantity <= 0 {
            return Err(DomainError::validation("billed quantity must be positive"));
        }
        Ok(Self {
            id,
            product_name: product_name.into(),
            quantity,
            total_price,
        })
    }
}
