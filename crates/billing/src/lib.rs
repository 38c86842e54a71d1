//! Billing domain module.
//!
//! Pure domain logic only: no IO, no persistence concerns. Bills are
//! immutable once created and the ledger is append-only.

pub mod bill;
pub mod ledger;

pub use bill::Bill;
pub use ledger::BillLedger;
