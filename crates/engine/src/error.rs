//! Engine error model: domain outcomes plus persistence faults.

use thiserror::Error;

use stockmate_core::DomainError;
use stockmate_store::StoreError;

/// Error surfaced at the presentation boundary.
///
/// `Domain` covers the expected, user-facing outcomes (validation failures,
/// unknown ids); `Store` covers environment faults (corrupt files, io).
/// All variants are recoverable; the engine never terminates the process.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
