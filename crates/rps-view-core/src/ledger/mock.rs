//! Mock ledger for testing.
//!
//! Snapshots are installed by hand. Writes are recorded and never applied:
//! the mock does not play the contract.

use super::traits::{GameLedger, LedgerError, TxHandle};
use crate::games::Choice;
use crate::protocol::Address;
use crate::view::ActiveGame;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// A write submitted to the mock
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum LedgerCall {
    CreateGame { from: Address, opponent: Address },
    JoinGame { from: Address, game: Address },
    Commit { from: Address, choice: Choice, password: String },
    Reveal { from: Address, password: String },
    ClaimDefaultWin { from: Address },
    LeaveGame { from: Address },
}

/// In-memory mock ledger for testing
#[derive(Clone, Default)]
pub struct MockLedger {
    /// Map of viewer -> active game
    games: Arc<Mutex<HashMap<Address, ActiveGame>>>,
    /// Writes in submission order
    calls: Arc<Mutex<Vec<LedgerCall>>>,
    /// Reject every write with this reason, if set
    rejection: Arc<Mutex<Option<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the snapshot `viewer` reads as their active game
    pub fn set_active_game(&self, viewer: Address, game: ActiveGame) {
        lock(&self.games).insert(viewer, game);
    }

    /// Install the same game for both of its players
    pub fn set_game_for_players(&self, game: ActiveGame) {
        let mut games = lock(&self.games);
        games.insert(game.record.player1, game.clone());
        if !game.record.player2.is_zero() {
            games.insert(game.record.player2, game);
        }
    }

    /// Drop the viewer's active game
    pub fn clear_active_game(&self, viewer: &Address) {
        lock(&self.games).remove(viewer);
    }

    /// All writes submitted so far (for testing)
    pub fn calls(&self) -> Vec<LedgerCall> {
        lock(&self.calls).clone()
    }

    /// Make every following write fail with `reason`, or succeed again with `None`
    pub fn reject_writes(&self, reason: Option<&str>) {
        *lock(&self.rejection) = reason.map(str::to_string);
    }

    fn submit(&self, call: LedgerCall) -> Result<TxHandle, LedgerError> {
        if let Some(reason) = lock(&self.rejection).clone() {
            return Err(LedgerError::Rejected(reason));
        }
        lock(&self.calls).push(call);
        Ok(TxHandle::new(format!("mock_tx_{}", Uuid::new_v4())))
    }
}

#[async_trait]
impl GameLedger for MockLedger {
    async fn active_game(&self, viewer: &Address) -> Result<Option<ActiveGame>, LedgerError> {
        Ok(lock(&self.games).get(viewer).cloned())
    }

    async fn create_game(
        &self,
        viewer: &Address,
        opponent: &Address,
    ) -> Result<TxHandle, LedgerError> {
        self.submit(LedgerCall::CreateGame {
            from: *viewer,
            opponent: *opponent,
        })
    }

    async fn join_game(&self, viewer: &Address, game: &Address) -> Result<TxHandle, LedgerError> {
        self.submit(LedgerCall::JoinGame {
            from: *viewer,
            game: *game,
        })
    }

    async fn commit(
        &self,
        viewer: &Address,
        choice: Choice,
        password: &str,
    ) -> Result<TxHandle, LedgerError> {
        self.submit(LedgerCall::Commit {
            from: *viewer,
            choice,
            password: password.to_string(),
        })
    }

    async fn reveal(&self, viewer: &Address, password: &str) -> Result<TxHandle, LedgerError> {
        self.submit(LedgerCall::Reveal {
            from: *viewer,
            password: password.to_string(),
        })
    }

    async fn claim_default_win(&self, viewer: &Address) -> Result<TxHandle, LedgerError> {
        self.submit(LedgerCall::ClaimDefaultWin { from: *viewer })
    }

    async fn leave_game(&self, viewer: &Address) -> Result<TxHandle, LedgerError> {
        self.submit(LedgerCall::LeaveGame { from: *viewer })
    }
}
