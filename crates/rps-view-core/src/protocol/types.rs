//! Protocol types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unix timestamp in seconds
pub type UnixTimestamp = u64;

/// 20-byte ledger account or contract address
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(#[serde(with = "prefixed_hex")] [u8; 20]);

impl Address {
    /// The unset address
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Is this the unset sentinel?
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl FromStr for Address {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(prefixed_hex::parse(s)?))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", hex::encode(&self.0[..6]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// 32-byte commit or reveal hash as stored by the ledger.
///
/// The all-zero value is the "not submitted yet" sentinel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hash(#[serde(with = "prefixed_hex")] [u8; 32]);

impl Hash {
    /// The "not submitted yet" sentinel
    pub const ZERO: Hash = Hash([0u8; 32]);

    /// Create from raw bytes
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Decode a `0x`-prefixed 64-digit hex literal at compile time.
    ///
    /// Panics (a compile error in const context) on malformed input.
    pub const fn from_hex_literal(s: &str) -> Self {
        let b = s.as_bytes();
        assert!(
            b.len() == 66 && b[0] == b'0' && b[1] == b'x',
            "expected 0x-prefixed 32-byte hex"
        );
        let mut out = [0u8; 32];
        let mut i = 0;
        while i < 32 {
            out[i] = (nibble(b[2 + 2 * i]) << 4) | nibble(b[3 + 2 * i]);
            i += 1;
        }
        Self(out)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Is this the "not submitted yet" sentinel?
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

const fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit"),
    }
}

impl FromStr for Hash {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(prefixed_hex::parse(s)?))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash(0x{})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

mod prefixed_hex {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn parse<const N: usize>(s: &str) -> Result<[u8; N], hex::FromHexError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let mut out = [0u8; N];
        hex::decode_to_slice(digits, &mut out)?;
        Ok(out)
    }

    pub fn serialize<const N: usize, S: Serializer>(
        bytes: &[u8; N],
        s: S,
    ) -> Result<S::Ok, S::Error> {
        format!("0x{}", hex::encode(bytes)).serialize(s)
    }

    pub fn deserialize<'de, const N: usize, D: Deserializer<'de>>(
        d: D,
    ) -> Result<[u8; N], D::Error> {
        let hex_str = String::deserialize(d)?;
        parse(&hex_str).map_err(serde::de::Error::custom)
    }
}

/// Ledger-assigned game phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Join,
    Commit,
    Reveal,
    Result,
}

impl Phase {
    /// Decode the ledger's numeric phase code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Phase::Join),
            1 => Some(Phase::Commit),
            2 => Some(Phase::Reveal),
            3 => Some(Phase::Result),
            _ => None,
        }
    }

    /// Numeric phase code as stored by the ledger
    pub fn code(&self) -> u8 {
        match self {
            Phase::Join => 0,
            Phase::Commit => 1,
            Phase::Reveal => 2,
            Phase::Result => 3,
        }
    }
}

/// Ledger-recorded game result
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    #[default]
    None,
    Player1Win,
    Player2Win,
    Draw,
}

impl GameResult {
    /// Decode the ledger's numeric result code.
    ///
    /// The ledger has no code for "no result"; its field only carries
    /// meaning once the game reaches the Result phase.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(GameResult::Player1Win),
            1 => Some(GameResult::Player2Win),
            2 => Some(GameResult::Draw),
            _ => None,
        }
    }

    /// Numeric result code as stored by the ledger, if one exists
    pub fn code(&self) -> Option<u8> {
        match self {
            GameResult::None => None,
            GameResult::Player1Win => Some(0),
            GameResult::Player2Win => Some(1),
            GameResult::Draw => Some(2),
        }
    }
}

/// Seat at the table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seat {
    Player1,
    Player2,
}

impl Seat {
    /// Get the opponent's seat
    pub fn opponent(&self) -> Seat {
        match self {
            Seat::Player1 => Seat::Player2,
            Seat::Player2 => Seat::Player1,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Player1 => write!(f, "Player 1"),
            Seat::Player2 => write!(f, "Player 2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parse_with_and_without_prefix() {
        let a: Address = "0x00000000000000000000000000000000000000aa".parse().unwrap();
        let b: Address = "00000000000000000000000000000000000000AA".parse().unwrap();
        assert_eq!(a, b);
        assert!(!a.is_zero());
        assert!(Address::ZERO.is_zero());
    }

    #[test]
    fn test_address_wrong_length_rejected() {
        assert!("0x1234".parse::<Address>().is_err());
    }

    #[test]
    fn test_hash_literal_matches_parse() {
        let s = "0x10977e4d68108d418408bc9310b60fc6d0a750c63ccef42cfb0ead23ab73d102";
        let parsed: Hash = s.parse().unwrap();
        assert_eq!(Hash::from_hex_literal(s), parsed);
        assert_eq!(parsed.to_string(), s);
    }

    #[test]
    fn test_hash_serializes_as_prefixed_hex() {
        let json = serde_json::to_string(&Hash::ZERO).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "0".repeat(64)));
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert!(back.is_zero());
    }

    #[test]
    fn test_phase_codes() {
        assert_eq!(Phase::from_code(2), Some(Phase::Reveal));
        assert_eq!(Phase::from_code(4), None);
        assert_eq!(Phase::Result.code(), 3);
    }

    #[test]
    fn test_result_codes() {
        assert_eq!(GameResult::from_code(0), Some(GameResult::Player1Win));
        assert_eq!(GameResult::from_code(1), Some(GameResult::Player2Win));
        assert_eq!(GameResult::from_code(2), Some(GameResult::Draw));
        assert_eq!(GameResult::from_code(3), None);
        assert_eq!(GameResult::Draw.code(), Some(2));
        assert_eq!(GameResult::None.code(), None);
    }

    #[test]
    fn test_seat_opponent() {
        assert_eq!(Seat::Player1.opponent(), Seat::Player2);
        assert_eq!(Seat::Player2.opponent(), Seat::Player1);
    }
}
