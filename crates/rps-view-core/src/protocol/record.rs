//! Game record snapshots read from the ledger.

use super::types::{Address, GameResult, Hash, Phase, Seat, UnixTimestamp};
use crate::error::RecordError;
use serde::{Deserialize, Serialize};

/// Immutable snapshot of one game as recorded by the ledger
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub initialized: bool,
    /// Absent when the record is not initialized
    pub phase: Option<Phase>,
    pub player1: Address,
    /// Zero until the second player joins
    pub player2: Address,
    pub commit1: Hash,
    pub commit2: Hash,
    pub reveal1: Hash,
    pub reveal2: Hash,
    pub reveal_deadline: UnixTimestamp,
    pub result: GameResult,
}

impl GameRecord {
    /// The snapshot the ledger returns for an address with no game
    pub fn uninitialized() -> Self {
        Self {
            initialized: false,
            phase: None,
            player1: Address::ZERO,
            player2: Address::ZERO,
            commit1: Hash::ZERO,
            commit2: Hash::ZERO,
            reveal1: Hash::ZERO,
            reveal2: Hash::ZERO,
            reveal_deadline: 0,
            result: GameResult::None,
        }
    }

    /// Check the record invariants. Uninitialized records carry nothing to check.
    pub fn validate(&self) -> Result<(), RecordError> {
        if !self.initialized {
            return Ok(());
        }
        let phase = self.phase.ok_or_else(|| {
            RecordError::InvalidRecord("initialized record has no phase".to_string())
        })?;
        if self.result != GameResult::None && phase != Phase::Result {
            return Err(RecordError::InvalidRecord(format!(
                "result {:?} recorded during {:?} phase",
                self.result, phase
            )));
        }
        Ok(())
    }

    /// Address sitting in the given seat
    pub fn player(&self, seat: Seat) -> &Address {
        match seat {
            Seat::Player1 => &self.player1,
            Seat::Player2 => &self.player2,
        }
    }

    /// Commit hash for the given seat
    pub fn commit(&self, seat: Seat) -> &Hash {
        match seat {
            Seat::Player1 => &self.commit1,
            Seat::Player2 => &self.commit2,
        }
    }

    /// Reveal hash for the given seat
    pub fn reveal(&self, seat: Seat) -> &Hash {
        match seat {
            Seat::Player1 => &self.reveal1,
            Seat::Player2 => &self.reveal2,
        }
    }
}

/// Wire form of a game record as returned by a ledger gateway.
///
/// Phase codes: 0=Join 1=Commit 2=Reveal 3=Result.
/// Result codes: 0=Player1Win 1=Player2Win 2=Draw, read only in the Result
/// phase. Earlier phases leave the ledger's zero default in `game_result`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGameRecord {
    pub initialized: bool,
    #[serde(default)]
    pub game_state: Option<u8>,
    #[serde(default)]
    pub player1: Address,
    #[serde(default)]
    pub player2: Address,
    #[serde(default)]
    pub commit1: Hash,
    #[serde(default)]
    pub commit2: Hash,
    #[serde(default)]
    pub reveal1: Hash,
    #[serde(default)]
    pub reveal2: Hash,
    #[serde(default)]
    pub reveal_deadline: UnixTimestamp,
    #[serde(default)]
    pub game_result: u8,
}

impl TryFrom<RawGameRecord> for GameRecord {
    type Error = RecordError;

    fn try_from(raw: RawGameRecord) -> Result<Self, Self::Error> {
        if !raw.initialized {
            return Ok(GameRecord::uninitialized());
        }

        let phase = match raw.game_state {
            Some(code) => Some(Phase::from_code(code).ok_or_else(|| {
                RecordError::InvalidRecord(format!("unknown phase code {}", code))
            })?),
            None => None,
        };
        let result = match phase {
            Some(Phase::Result) => GameResult::from_code(raw.game_result).ok_or_else(|| {
                RecordError::InvalidRecord(format!("unknown result code {}", raw.game_result))
            })?,
            _ => GameResult::None,
        };

        let record = GameRecord {
            initialized: true,
            phase,
            player1: raw.player1,
            player2: raw.player2,
            commit1: raw.commit1,
            commit2: raw.commit2,
            reveal1: raw.reveal1,
            reveal2: raw.reveal2,
            reveal_deadline: raw.reveal_deadline,
            result,
        };
        record.validate()?;
        Ok(record)
    }
}

impl From<&GameRecord> for RawGameRecord {
    fn from(record: &GameRecord) -> Self {
        RawGameRecord {
            initialized: record.initialized,
            game_state: record.phase.map(|p| p.code()),
            player1: record.player1,
            player2: record.player2,
            commit1: record.commit1,
            commit2: record.commit2,
            reveal1: record.reveal1,
            reveal2: record.reveal2,
            reveal_deadline: record.reveal_deadline,
            game_result: record.result.code().unwrap_or(0),
        }
    }
}
