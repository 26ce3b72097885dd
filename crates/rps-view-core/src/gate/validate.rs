//! Local input checks run before a write is dispatched.

use crate::games::Choice;
use thiserror::Error;

/// Longest password the input boundary accepts, in characters.
///
/// The validators below assume callers already enforce this.
pub const MAX_PASSWORD_LEN: usize = 15;

/// Input that must be fixed before the write can go out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No choice selected: please choose rock, paper or scissors")]
    NoChoiceSelected,

    #[error("No password set: please enter the password for your commit")]
    EmptyPassword,
}

/// Check the inputs of a commit and hand back the selected choice
pub fn validate_commit(choice: Option<Choice>, password: &str) -> Result<Choice, ValidationError> {
    let choice = choice.ok_or(ValidationError::NoChoiceSelected)?;
    validate_reveal(password)?;
    Ok(choice)
}

/// Check the inputs of a reveal
pub fn validate_reveal(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    Ok(())
}
