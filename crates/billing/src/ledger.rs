use stockmate_core::{BillId, DomainError, DomainResult};

use crate::bill::Bill;

/// Append-only register of bills, oldest first.
///
/// No update or delete operation exists; a bill that entered the ledger
/// stays exactly as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillLedger {
    bills: Vec<Bill>,
}

impl BillLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from an already-persisted sequence.
    pub fn from_bills(bills: Vec<Bill>) -> DomainResult<Self> {
        let mut ledger = Self::new();
        for bill in bills {
            ledger.append(bill)?;
        }
        Ok(ledger)
    }

    /// Append a bill. The id must not already be present.
    pub fn append(&mut self, bill: Bill) -> DomainResult<()> {
        if self.bills.iter().any(|b| b.id == bill.id) {
            return Err(DomainError::conflict(format!(
                "bill id {} already present",
                bill.id
            )));
        }
        self.bills.push(bill);
        Ok(())
    }

    pub fn as_slice(&self) -> &[Bill] {
        &self.bills
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bill> {
        self.bills.iter()
    }

    pub fn len(&self) -> usize {
        self.bills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }

    /// Sum of all bill totals, widened to avoid overflow on accumulation.
    pub fn gross_total(&self) -> u128 {
        self.bills.iter().map(|b| b.total_price as u128).sum()
    }

    /// Highest id currently in the ledger (for counter reconciliation).
    pub fn max_id(&self) -> Option<BillId> {
        self.bills.iter().map(|b| b.id).max()
    }

    pub fn into_bills(self) -> Vec<Bill> {
        self.bills
    }
}
