//! Action gating and local input validation.

mod actions;
mod validate;

pub use actions::{permitted_actions, Action, PermittedActions};
pub use validate::{validate_commit, validate_reveal, ValidationError, MAX_PASSWORD_LEN};
