//! Protocol types and ledger records.

mod record;
mod types;

pub use record::{GameRecord, RawGameRecord};
pub use types::{Address, GameResult, Hash, Phase, Seat, UnixTimestamp};
