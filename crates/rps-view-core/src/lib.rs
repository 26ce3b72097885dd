//! RPS View Core Library
//!
//! This crate derives the client-side view of a two-player commit-reveal
//! Rock-Paper-Scissors game from raw ledger snapshots, decides which actions
//! are currently legal, and resolves revealed choices for display.
//!
//! The ledger owns every game record. Nothing here enacts a transition: the
//! core only observes snapshots and gates what the viewer may submit next.

pub mod client;
pub mod clock;
pub mod crypto;
pub mod error;
pub mod games;
pub mod gate;
pub mod ledger;
pub mod protocol;
pub mod view;

pub use client::{ClientError, GameClient, GameSnapshot};
pub use clock::{Clock, FixedClock, SystemClock};
pub use crypto::{resolve_choice, PAPER_HASH, ROCK_HASH, SCISSORS_HASH};
pub use error::RecordError;
pub use games::Choice;
pub use gate::{
    permitted_actions, validate_commit, validate_reveal, Action, PermittedActions,
    ValidationError, MAX_PASSWORD_LEN,
};
pub use ledger::{GameLedger, LedgerCall, LedgerError, MockLedger, RpcLedger, TxHandle};
pub use protocol::{Address, GameRecord, GameResult, Hash, Phase, RawGameRecord, Seat};
pub use view::{derive, derive_active, ActiveGame, GameView, Outcome, UiPhase};
