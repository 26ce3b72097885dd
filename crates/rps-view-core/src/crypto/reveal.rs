//! Canonical reveal hashes for the commit-reveal scheme.
//!
//! When a player reveals, the ledger stores the canonical hash of the
//! choice the commitment opened to. Matching a stored reveal against the
//! three constants below recovers the symbolic choice for display.

use crate::games::Choice;
use crate::protocol::{GameRecord, Hash, Seat};

/// Canonical pre-image hash stored for a revealed "rock"
pub const ROCK_HASH: Hash =
    Hash::from_hex_literal("0x10977e4d68108d418408bc9310b60fc6d0a750c63ccef42cfb0ead23ab73d102");

/// Canonical pre-image hash stored for a revealed "paper"
pub const PAPER_HASH: Hash =
    Hash::from_hex_literal("0xea923ca2cdda6b54f4fb2bf6a063e5a59a6369ca4c4ae2c4ce02a147b3036a21");

/// Canonical pre-image hash stored for a revealed "scissors"
pub const SCISSORS_HASH: Hash =
    Hash::from_hex_literal("0x389a2d4e358d901bfdf22245f32b4b0a401cc16a4b92155a2ee5da98273dad9a");

impl Choice {
    /// Canonical reveal hash for this choice
    pub fn canonical_hash(&self) -> Hash {
        match self {
            Choice::Rock => ROCK_HASH,
            Choice::Paper => PAPER_HASH,
            Choice::Scissors => SCISSORS_HASH,
        }
    }
}

/// Map a stored reveal back to its choice.
///
/// `None` means there is nothing to show: the zero sentinel before a reveal,
/// or any value that is not one of the canonical hashes.
pub fn resolve_choice(reveal: &Hash) -> Option<Choice> {
    Choice::ALL
        .into_iter()
        .find(|choice| choice.canonical_hash() == *reveal)
}

/// Revealed choices of both seats, `(player1, player2)`
pub fn revealed_choices(record: &GameRecord) -> (Option<Choice>, Option<Choice>) {
    (
        resolve_choice(record.reveal(Seat::Player1)),
        resolve_choice(record.reveal(Seat::Player2)),
    )
}
