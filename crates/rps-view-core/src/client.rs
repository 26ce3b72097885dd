//! Game client: reads snapshots, gates actions, and dispatches writes.

use crate::clock::Clock;
use crate::crypto::revealed_choices;
use crate::error::RecordError;
use crate::games::Choice;
use crate::gate::{
    permitted_actions, validate_commit, validate_reveal, Action, PermittedActions,
    ValidationError,
};
use crate::ledger::{GameLedger, LedgerError, TxHandle};
use crate::protocol::{Address, GameRecord, Seat};
use crate::view::{
    derive_active, format_time_left, seat_label, status_message, GameView, UiPhase,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors from client operations
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Ledger(LedgerError),

    #[error("Cannot {action} during the {phase:?} phase")]
    NotPermitted { action: Action, phase: UiPhase },
}

impl From<LedgerError> for ClientError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Record(record) => ClientError::Record(record),
            other => ClientError::Ledger(other),
        }
    }
}

/// Everything a UI needs to draw the game at one instant
#[derive(Clone, Debug, Serialize)]
pub struct GameSnapshot {
    /// Address of the active game, if any
    pub game: Option<Address>,
    pub record: Option<GameRecord>,
    pub view: GameView,
    pub permitted: PermittedActions,
    pub status: String,
    /// Countdown text, shown once the viewer has revealed
    pub time_left: Option<String>,
    pub player1_label: String,
    pub player2_label: String,
    /// Revealed choices, only once the game has a result
    pub player1_choice: Option<Choice>,
    pub player2_choice: Option<Choice>,
}

impl GameSnapshot {
    fn build(game: Option<Address>, record: Option<GameRecord>, view: GameView) -> Self {
        let permitted = permitted_actions(&view);
        let time_left = match (view.ui_phase, view.viewer_has_revealed, view.seconds_remaining) {
            (UiPhase::Reveal, true, Some(secs)) => Some(format_time_left(secs)),
            _ => None,
        };
        let (player1_choice, player2_choice) = match (&record, view.ui_phase) {
            (Some(record), UiPhase::Result) => revealed_choices(record),
            _ => (None, None),
        };
        Self {
            game,
            record,
            permitted,
            status: status_message(&view).to_string(),
            time_left,
            player1_label: seat_label(&view, Seat::Player1).to_string(),
            player2_label: seat_label(&view, Seat::Player2).to_string(),
            player1_choice,
            player2_choice,
            view,
        }
    }
}

/// Client bound to one viewer
#[derive(Clone)]
pub struct GameClient {
    ledger: Arc<dyn GameLedger>,
    clock: Arc<dyn Clock>,
    viewer: Address,
}

impl GameClient {
    pub fn new(ledger: Arc<dyn GameLedger>, clock: Arc<dyn Clock>, viewer: Address) -> Self {
        Self {
            ledger,
            clock,
            viewer,
        }
    }

    pub fn viewer(&self) -> &Address {
        &self.viewer
    }

    /// Fetch the active game and derive a fresh snapshot
    pub async fn snapshot(&self) -> Result<GameSnapshot, ClientError> {
        let active = self.ledger.active_game(&self.viewer).await?;
        let now = self.clock.now();
        let view = derive_active(active.as_ref(), &self.viewer, now)?;
        debug!(viewer = %self.viewer, now, phase = ?view.ui_phase, "derived game view");

        let snapshot = match active {
            Some(game) if view.ui_phase != UiPhase::NoGame => {
                GameSnapshot::build(Some(game.address), Some(game.record), view)
            }
            _ => GameSnapshot::build(None, None, view),
        };
        Ok(snapshot)
    }

    /// Refuse unless the current view permits `action`
    async fn ensure_permitted(&self, action: Action) -> Result<(), ClientError> {
        let snapshot = self.snapshot().await?;
        if snapshot.permitted.contains(action) {
            return Ok(());
        }
        warn!(viewer = %self.viewer, %action, phase = ?snapshot.view.ui_phase, "action not permitted");
        Err(ClientError::NotPermitted {
            action,
            phase: snapshot.view.ui_phase,
        })
    }

    pub async fn create_game(&self, opponent: &Address) -> Result<TxHandle, ClientError> {
        self.ensure_permitted(Action::Create).await?;
        let tx = self.ledger.create_game(&self.viewer, opponent).await?;
        info!(viewer = %self.viewer, %opponent, %tx, "Created game");
        Ok(tx)
    }

    pub async fn join_game(&self, game: &Address) -> Result<TxHandle, ClientError> {
        self.ensure_permitted(Action::Join).await?;
        let tx = self.ledger.join_game(&self.viewer, game).await?;
        info!(viewer = %self.viewer, %game, %tx, "Joined game");
        Ok(tx)
    }

    /// Commit to `choice`. Inputs are checked before the ledger is consulted.
    pub async fn commit(
        &self,
        choice: Option<Choice>,
        password: &str,
    ) -> Result<TxHandle, ClientError> {
        let choice = validate_commit(choice, password)?;
        self.ensure_permitted(Action::Commit).await?;
        let tx = self.ledger.commit(&self.viewer, choice, password).await?;
        info!(viewer = %self.viewer, %tx, "Submitted commitment");
        Ok(tx)
    }

    pub async fn reveal(&self, password: &str) -> Result<TxHandle, ClientError> {
        validate_reveal(password)?;
        self.ensure_permitted(Action::Reveal).await?;
        let tx = self.ledger.reveal(&self.viewer, password).await?;
        info!(viewer = %self.viewer, %tx, "Submitted reveal");
        Ok(tx)
    }

    pub async fn claim_default_win(&self) -> Result<TxHandle, ClientError> {
        self.ensure_permitted(Action::ClaimDefaultWin).await?;
        let tx = self.ledger.claim_default_win(&self.viewer).await?;
        info!(viewer = %self.viewer, %tx, "Claimed default win");
        Ok(tx)
    }

    pub async fn leave_game(&self) -> Result<TxHandle, ClientError> {
        self.ensure_permitted(Action::Leave).await?;
        let tx = self.ledger.leave_game(&self.viewer).await?;
        info!(viewer = %self.viewer, %tx, "Left game");
        Ok(tx)
    }
}
