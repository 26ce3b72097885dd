//! Human-facing text for a game view.

use super::derive::{GameView, Outcome, UiPhase};
use crate::protocol::Seat;

/// One-line description of where the game stands for the viewer
pub fn status_message(view: &GameView) -> &'static str {
    match view.ui_phase {
        UiPhase::NoGame => "No active game",
        UiPhase::Join => "Waiting for Player 2 to join",
        UiPhase::Commit if view.viewer_has_committed => "Waiting for other player to commit",
        UiPhase::Commit => "Waiting for you to commit",
        UiPhase::Reveal if view.viewer_has_revealed => "Waiting for other player to reveal",
        UiPhase::Reveal => "Committed. Waiting for you to reveal",
        UiPhase::Result => match view.outcome_for_viewer {
            Outcome::Draw => "It's a draw!",
            Outcome::Won => "🏆 You won! 🎉🎉",
            Outcome::Lost | Outcome::Unknown => "😞 You lost!",
        },
    }
}

/// Heading for a seat: "You" for the viewer's own seat
pub fn seat_label(view: &GameView, seat: Seat) -> &'static str {
    match (seat == view.viewer_seat(), seat) {
        (true, _) => "You",
        (false, Seat::Player1) => "Player 1",
        (false, Seat::Player2) => "Player 2",
    }
}

/// Render a countdown like "1 hour, 2 minutes, 5 seconds"
pub fn format_time_left(seconds: u64) -> String {
    const UNITS: [(u64, &str); 4] = [(86_400, "day"), (3_600, "hour"), (60, "minute"), (1, "second")];

    if seconds == 0 {
        return "0 seconds".to_string();
    }

    let mut rest = seconds;
    let mut parts = Vec::new();
    for (size, name) in UNITS {
        let count = rest / size;
        rest %= size;
        if count > 0 {
            let plural = if count == 1 { "" } else { "s" };
            parts.push(format!("{} {}{}", count, name, plural));
        }
    }
    parts.join(", ")
}
