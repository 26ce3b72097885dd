//! Ledger trait definition.

use crate::error::RecordError;
use crate::games::Choice;
use crate::protocol::Address;
use crate::view::ActiveGame;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from ledger operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Transaction rejected: {0}")]
    Rejected(String),

    #[error("Malformed ledger response: {0}")]
    Decode(String),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Handle for a submitted, possibly still pending, transaction.
///
/// Opaque to the core: it is passed back to the caller untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHandle(String);

impl TxHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait for the ledger that hosts the game contract
///
/// This trait abstracts the read and write operations the client needs.
/// Implementations can be:
/// - MockLedger for testing
/// - RpcLedger for a ledger gateway reachable over JSON-RPC
///
/// Every write is signed by `viewer`.
#[async_trait]
pub trait GameLedger: Send + Sync {
    /// The viewer's active game, `None` if there is none
    async fn active_game(&self, viewer: &Address) -> Result<Option<ActiveGame>, LedgerError>;

    /// Open a new game against `opponent`
    async fn create_game(&self, viewer: &Address, opponent: &Address)
        -> Result<TxHandle, LedgerError>;

    /// Take the second seat of the game at `game`
    async fn join_game(&self, viewer: &Address, game: &Address) -> Result<TxHandle, LedgerError>;

    /// Commit to a choice, bound by `password`
    async fn commit(
        &self,
        viewer: &Address,
        choice: Choice,
        password: &str,
    ) -> Result<TxHandle, LedgerError>;

    /// Open the commitment with the same `password`
    async fn reveal(&self, viewer: &Address, password: &str) -> Result<TxHandle, LedgerError>;

    /// Claim the win after the opponent missed the reveal deadline
    async fn claim_default_win(&self, viewer: &Address) -> Result<TxHandle, LedgerError>;

    /// Leave a finished game
    async fn leave_game(&self, viewer: &Address) -> Result<TxHandle, LedgerError>;
}
