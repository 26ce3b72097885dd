//! Which actions a view permits.

use crate::view::{GameView, UiPhase};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Something the viewer can ask the ledger to do
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    Join,
    Create,
    Commit,
    Reveal,
    ClaimDefaultWin,
    Leave,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Join => "join",
            Action::Create => "create",
            Action::Commit => "commit",
            Action::Reveal => "reveal",
            Action::ClaimDefaultWin => "claim default win",
            Action::Leave => "leave",
        };
        write!(f, "{}", name)
    }
}

/// Set of actions currently open to the viewer
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermittedActions(BTreeSet<Action>);

impl PermittedActions {
    pub fn contains(&self, action: Action) -> bool {
        self.0.contains(&action)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Action> for PermittedActions {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Actions the view allows right now
pub fn permitted_actions(view: &GameView) -> PermittedActions {
    let actions: &[Action] = match view.ui_phase {
        UiPhase::NoGame => &[Action::Join, Action::Create],
        UiPhase::Join => &[],
        UiPhase::Commit if !view.viewer_has_committed => &[Action::Commit],
        UiPhase::Commit => &[],
        UiPhase::Reveal if !view.viewer_has_revealed => &[Action::Reveal],
        UiPhase::Reveal if view.seconds_remaining == Some(0) => &[Action::ClaimDefaultWin],
        UiPhase::Reveal => &[],
        UiPhase::Result => &[Action::Leave],
    };
    actions.iter().copied().collect()
}
