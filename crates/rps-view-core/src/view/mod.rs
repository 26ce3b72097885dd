//! Viewer-relative game state.

mod derive;
mod status;

pub use derive::{derive, derive_active, ActiveGame, GameView, Outcome, UiPhase};
pub use status::{format_time_left, seat_label, status_message};
