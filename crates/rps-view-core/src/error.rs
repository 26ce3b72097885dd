//! Record errors.

use thiserror::Error;

/// The ledger snapshot handed to the deriver breaks the record invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Invalid game record: {0}")]
    InvalidRecord(String),
}
