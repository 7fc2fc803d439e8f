use crate::tile::{Suit, Tile};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    /// Unrecognised tile code such as `"0m"` or `"X"`.
    InvalidCode(String),
    RankOutOfRange { suit: Suit, rank: u8 },
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileError::InvalidCode(code) => write!(f, "invalid tile code: {}", code),
            TileError::RankOutOfRange { suit, rank } => {
                write!(f, "rank {} is out of range for {:?}", rank, suit)
            }
        }
    }
}

impl std::error::Error for TileError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    Full,
    TooManyCopies(Tile),
    IndexOutOfRange { index: usize, len: usize },
    WrongTileCount(usize),
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandError::Full => write!(f, "hand already holds 14 tiles"),
            HandError::TooManyCopies(t) => {
                write!(f, "cannot hold more than 4 copies of {}", t)
            }
            HandError::IndexOutOfRange { index, len } => {
                write!(f, "tile index {} out of range (hand has {} tiles)", index, len)
            }
            HandError::WrongTileCount(n) => {
                write!(f, "exactly 14 tiles are required, got {}", n)
            }
        }
    }
}

impl std::error::Error for HandError {}

/// Rejected request at the evaluation boundary (before any scoring runs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    Tile(TileError),
    Hand(HandError),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Tile(e) => write!(f, "{}", e),
            RequestError::Hand(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RequestError {}

impl From<TileError> for RequestError {
    fn from(e: TileError) -> Self {
        RequestError::Tile(e)
    }
}

impl From<HandError> for RequestError {
    fn from(e: HandError) -> Self {
        RequestError::Hand(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    NotStarted,
    AlreadyStarted,
    Finished,
    TooManyPlayers { given: usize, seats: usize },
    SeatOutOfRange { seat: usize, seats: usize },
    /// Ron without a discarder.
    MissingLoser,
    SameWinnerAndLoser,
    /// Payment shape does not fit the win type (e.g. split payment on ron).
    PaymentMismatch,
    /// A payment too large to settle in a player's balance.
    PointsOutOfRange,
    AlreadyInRiichi { seat: usize },
    InsufficientPoints { seat: usize, points: i32 },
    NukidoraRequiresThreePlayer,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NotStarted => write!(f, "game has not started"),
            GameError::AlreadyStarted => write!(f, "game has already started"),
            GameError::Finished => write!(f, "game is finished"),
            GameError::TooManyPlayers { given, seats } => {
                write!(f, "{} players given for {} seats", given, seats)
            }
            GameError::SeatOutOfRange { seat, seats } => {
                write!(f, "seat {} out of range (table has {} seats)", seat, seats)
            }
            GameError::MissingLoser => write!(f, "ron requires a discarding player"),
            GameError::SameWinnerAndLoser => {
                write!(f, "winner and loser cannot be the same player")
            }
            GameError::PaymentMismatch => {
                write!(f, "payment does not match the win type")
            }
            GameError::PointsOutOfRange => write!(f, "payment is out of range"),
            GameError::AlreadyInRiichi { seat } => {
                write!(f, "seat {} is already in riichi", seat)
            }
            GameError::InsufficientPoints { seat, points } => {
                write!(f, "seat {} has {} points, riichi needs 1000", seat, points)
            }
            GameError::NukidoraRequiresThreePlayer => {
                write!(f, "nukidora is only available in three-player games")
            }
        }
    }
}

impl std::error::Error for GameError {}

pub type GameResult<T> = Result<T, GameError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Payload was not valid snapshot JSON.
    Serialization { message: String },
    /// Payload decoded but describes an impossible table.
    InvalidState { message: String },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Serialization { message } => {
                write!(f, "Serialization error: {}", message)
            }
            SnapshotError::InvalidState { message } => write!(f, "Invalid state: {}", message),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Serialization {
            message: e.to_string(),
        }
    }
}
