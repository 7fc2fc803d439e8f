use crate::errors::TileError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Man,
    Pin,
    Sou,
    Wind,
    Dragon,
}

impl Suit {
    pub fn is_honor(self) -> bool {
        matches!(self, Suit::Wind | Suit::Dragon)
    }

    pub fn is_numeric(self) -> bool {
        !self.is_honor()
    }

    fn max_rank(self) -> u8 {
        match self {
            Suit::Man | Suit::Pin | Suit::Sou => 9,
            Suit::Wind => 3,
            Suit::Dragon => 2,
        }
    }

    fn min_rank(self) -> u8 {
        if self.is_numeric() {
            1
        } else {
            0
        }
    }
}

/// Wind ranks: E=0, S=1, W=2, N=3.
pub const EAST: u8 = 0;
pub const SOUTH: u8 = 1;
pub const WEST: u8 = 2;
pub const NORTH: u8 = 3;

/// Dragon ranks: white=0, green=1, red=2.
pub const WHITE: u8 = 0;
pub const GREEN: u8 = 1;
pub const RED: u8 = 2;

/// A tile is a value object; identity is `(suit, rank)`.
///
/// Ordering follows display order: man < pin < sou < wind < dragon, then rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tile {
    suit: Suit,
    rank: u8,
}

impl Tile {
    pub fn new(suit: Suit, rank: u8) -> Result<Self, TileError> {
        if rank < suit.min_rank() || rank > suit.max_rank() {
            return Err(TileError::RankOutOfRange { suit, rank });
        }
        Ok(Tile { suit, rank })
    }

    pub fn man(rank: u8) -> Result<Self, TileError> {
        Self::new(Suit::Man, rank)
    }

    pub fn pin(rank: u8) -> Result<Self, TileError> {
        Self::new(Suit::Pin, rank)
    }

    pub fn sou(rank: u8) -> Result<Self, TileError> {
        Self::new(Suit::Sou, rank)
    }

    pub fn wind(rank: u8) -> Result<Self, TileError> {
        Self::new(Suit::Wind, rank)
    }

    pub fn dragon(rank: u8) -> Result<Self, TileError> {
        Self::new(Suit::Dragon, rank)
    }

    pub fn from_code(code: &str) -> Result<Self, TileError> {
        match code {
            "E" => return Self::wind(EAST),
            "S" => return Self::wind(SOUTH),
            "W" => return Self::wind(WEST),
            "N" => return Self::wind(NORTH),
            "P" => return Self::dragon(WHITE),
            "F" => return Self::dragon(GREEN),
            "C" => return Self::dragon(RED),
            _ => {}
        }

        let bytes = code.as_bytes();
        if bytes.len() != 2 {
            return Err(TileError::InvalidCode(code.to_string()));
        }

        let n = (bytes[0] as char)
            .to_digit(10)
            .ok_or_else(|| TileError::InvalidCode(code.to_string()))? as u8;

        let suit = match bytes[1] as char {
            'm' => Suit::Man,
            'p' => Suit::Pin,
            's' => Suit::Sou,
            _ => return Err(TileError::InvalidCode(code.to_string())),
        };

        Self::new(suit, n)
    }

    pub fn code(&self) -> String {
        match self.suit {
            Suit::Man => format!("{}m", self.rank),
            Suit::Pin => format!("{}p", self.rank),
            Suit::Sou => format!("{}s", self.rank),
            Suit::Wind => ["E", "S", "W", "N"][self.rank as usize].to_string(),
            Suit::Dragon => ["P", "F", "C"][self.rank as usize].to_string(),
        }
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn is_honor(&self) -> bool {
        self.suit.is_honor()
    }

    pub fn is_dragon(&self) -> bool {
        self.suit == Suit::Dragon
    }

    /// 中張牌: numeric tile ranked 2..=8.
    pub fn is_simple(&self) -> bool {
        self.suit.is_numeric() && (2..=8).contains(&self.rank)
    }

    /// Next rank in the same numeric suit, if any.
    pub fn next(&self) -> Option<Self> {
        if self.is_honor() || self.rank >= 9 {
            None
        } else {
            Some(Tile {
                suit: self.suit,
                rank: self.rank + 1,
            })
        }
    }

    pub fn next2(&self) -> Option<Self> {
        self.next().and_then(|t| t.next())
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

impl TryFrom<String> for Tile {
    type Error = TileError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Tile::from_code(&code)
    }
}

impl From<Tile> for String {
    fn from(t: Tile) -> Self {
        t.code()
    }
}

pub fn parse_tiles(codes: &[String]) -> Result<Vec<Tile>, TileError> {
    codes.iter().map(|c| Tile::from_code(c)).collect()
}

pub fn sort_tiles(v: &mut [Tile]) {
    v.sort();
}
