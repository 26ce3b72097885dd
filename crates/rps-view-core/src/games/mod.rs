//! Game definitions.

mod rps;

pub use rps::{Choice, UnknownChoice};
