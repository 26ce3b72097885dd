//! Integration tests for the full game flow.
//!
//! A `MockLedger` stands in for the contract: each step installs the snapshot
//! the contract would have recorded, and both players' clients re-derive
//! their views from it.

use rps_view_core::{
    permitted_actions, resolve_choice, validate_commit, Action, ActiveGame, Address, Choice,
    ClientError, FixedClock, GameClient, GameRecord, GameResult, Hash, LedgerCall, MockLedger,
    Outcome, Phase, UiPhase, ValidationError, PAPER_HASH, ROCK_HASH, SCISSORS_HASH,
};
use std::sync::Arc;

fn alice() -> Address {
    "0x00000000000000000000000000000000000a11ce".parse().unwrap()
}

fn bob() -> Address {
    "0x0000000000000000000000000000000000000b0b".parse().unwrap()
}

fn game_address() -> Address {
    "0x6a6d6e6f6a6d6e6f6a6d6e6f6a6d6e6f6a6d6e6f".parse().unwrap()
}

fn commitment(b: u8) -> Hash {
    Hash::from_bytes([b; 32])
}

fn publish(ledger: &MockLedger, record: GameRecord) {
    ledger.set_game_for_players(ActiveGame {
        address: game_address(),
        record,
    });
}

fn base_record(phase: Phase) -> GameRecord {
    GameRecord {
        initialized: true,
        phase: Some(phase),
        player1: alice(),
        player2: bob(),
        ..GameRecord::uninitialized()
    }
}

/// Alice creates, Bob joins, both commit and reveal, Alice wins
#[tokio::test]
async fn test_full_game_player1_wins() {
    let ledger = MockLedger::new();
    let clock = Arc::new(FixedClock::new(1_000));
    let a = GameClient::new(Arc::new(ledger.clone()), clock.clone(), alice());
    let b = GameClient::new(Arc::new(ledger.clone()), clock.clone(), bob());

    // No game yet: both entry points open
    let snap = a.snapshot().await.unwrap();
    assert_eq!(snap.view.ui_phase, UiPhase::NoGame);
    a.create_game(&bob()).await.unwrap();

    // Ledger records the game waiting for Bob
    let mut record = base_record(Phase::Join);
    record.player2 = Address::ZERO;
    ledger.set_active_game(alice(), ActiveGame {
        address: game_address(),
        record,
    });
    let snap = a.snapshot().await.unwrap();
    assert_eq!(snap.status, "Waiting for Player 2 to join");
    assert!(snap.permitted.is_empty());

    b.join_game(&game_address()).await.unwrap();

    // Commit phase
    publish(&ledger, base_record(Phase::Commit));
    a.commit(Some(Choice::Rock), "alicepw").await.unwrap();

    let mut record = base_record(Phase::Commit);
    record.commit1 = commitment(1);
    publish(&ledger, record.clone());

    let a_view = a.snapshot().await.unwrap().view;
    assert!(a_view.viewer_has_committed);
    assert!(!a_view.opponent_has_committed);
    let b_view = b.snapshot().await.unwrap().view;
    assert!(b_view.opponent_has_committed);
    assert!(permitted_actions(&b_view).contains(Action::Commit));

    b.commit(Some(Choice::Scissors), "bobpw").await.unwrap();

    // Reveal phase
    record.phase = Some(Phase::Reveal);
    record.commit2 = commitment(2);
    record.reveal_deadline = 1_300;
    publish(&ledger, record.clone());

    a.reveal("alicepw").await.unwrap();
    record.reveal1 = ROCK_HASH;
    publish(&ledger, record.clone());

    let snap = a.snapshot().await.unwrap();
    assert_eq!(snap.view.seconds_remaining, Some(300));
    assert_eq!(snap.time_left.as_deref(), Some("5 minutes"));
    assert!(snap.permitted.is_empty());

    b.reveal("bobpw").await.unwrap();

    // Result
    record.phase = Some(Phase::Result);
    record.reveal2 = SCISSORS_HASH;
    record.result = GameResult::Player1Win;
    publish(&ledger, record);

    let a_snap = a.snapshot().await.unwrap();
    let b_snap = b.snapshot().await.unwrap();
    assert_eq!(a_snap.view.outcome_for_viewer, Outcome::Won);
    assert_eq!(b_snap.view.outcome_for_viewer, Outcome::Lost);
    assert_eq!(a_snap.status, "🏆 You won! 🎉🎉");
    assert_eq!(b_snap.status, "😞 You lost!");
    assert_eq!(b_snap.player1_label, "Player 1");
    assert_eq!(b_snap.player2_label, "You");
    assert_eq!(a_snap.player1_choice, Some(Choice::Rock));
    assert_eq!(a_snap.player2_choice, Some(Choice::Scissors));

    a.leave_game().await.unwrap();

    let calls = ledger.calls();
    assert_eq!(calls.len(), 7);
    assert_eq!(calls.last(), Some(&LedgerCall::LeaveGame { from: alice() }));
}

/// Bob never reveals; Alice claims once the deadline has passed
#[tokio::test]
async fn test_default_win_after_deadline() {
    let ledger = MockLedger::new();
    let clock = Arc::new(FixedClock::new(2_000));
    let a = GameClient::new(Arc::new(ledger.clone()), clock.clone(), alice());
    let b = GameClient::new(Arc::new(ledger.clone()), clock.clone(), bob());

    let mut record = base_record(Phase::Reveal);
    record.commit1 = commitment(1);
    record.commit2 = commitment(2);
    record.reveal1 = PAPER_HASH;
    record.reveal_deadline = 2_060;
    publish(&ledger, record);

    // too early
    assert!(matches!(
        a.claim_default_win().await,
        Err(ClientError::NotPermitted {
            action: Action::ClaimDefaultWin,
            phase: UiPhase::Reveal
        })
    ));

    clock.advance(60);
    let snap = a.snapshot().await.unwrap();
    assert_eq!(snap.view.seconds_remaining, Some(0));
    assert_eq!(snap.time_left.as_deref(), Some("0 seconds"));
    a.claim_default_win().await.unwrap();

    // Bob has not revealed, so he may still reveal but never claim
    let b_snap = b.snapshot().await.unwrap();
    assert!(b_snap.permitted.contains(Action::Reveal));
    assert!(!b_snap.permitted.contains(Action::ClaimDefaultWin));
    assert_eq!(b_snap.time_left, None);
}

#[tokio::test]
async fn test_draw_is_draw_for_both() {
    let ledger = MockLedger::new();
    let clock = Arc::new(FixedClock::new(0));
    let mut record = base_record(Phase::Result);
    record.reveal1 = PAPER_HASH;
    record.reveal2 = PAPER_HASH;
    record.result = GameResult::Draw;
    publish(&ledger, record);

    for viewer in [alice(), bob()] {
        let client = GameClient::new(Arc::new(ledger.clone()), clock.clone(), viewer);
        let snap = client.snapshot().await.unwrap();
        assert_eq!(snap.view.outcome_for_viewer, Outcome::Draw);
        assert_eq!(snap.status, "It's a draw!");
    }
}

#[test]
fn test_resolver_and_validators() {
    assert_eq!(resolve_choice(&ROCK_HASH), Some(Choice::Rock));
    assert_eq!(resolve_choice(&Hash::ZERO), None);
    assert_eq!(
        validate_commit(None, "pw"),
        Err(ValidationError::NoChoiceSelected)
    );
    assert_eq!(
        validate_commit(Some(Choice::Rock), ""),
        Err(ValidationError::EmptyPassword)
    );
}
