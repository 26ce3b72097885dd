//! Commit-reveal primitives.
//!
//! The commitments themselves are computed on the ledger side. This module
//! only knows the canonical reveal hashes and how to match against them.

mod reveal;

pub use reveal::{resolve_choice, revealed_choices, PAPER_HASH, ROCK_HASH, SCISSORS_HASH};
