use crate::engine::{evaluate, WinContext};
use crate::errors::HandError;
use crate::tile::Tile;
use crate::ScoreResult;

pub const HAND_SIZE: usize = 14;

/// Tiles being picked for a scoring attempt, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    tiles: Vec<Tile>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tile: Tile) -> Result<(), HandError> {
        if self.tiles.len() >= HAND_SIZE {
            return Err(HandError::Full);
        }
        if self.count(tile) >= 4 {
            return Err(HandError::TooManyCopies(tile));
        }
        self.tiles.push(tile);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Tile, HandError> {
        if index >= self.tiles.len() {
            return Err(HandError::IndexOutOfRange {
                index,
                len: self.tiles.len(),
            });
        }
        Ok(self.tiles.remove(index))
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.tiles.len() == HAND_SIZE
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

/// Hand plus the discard list used by the furiten check.
#[derive(Debug, Clone, Default)]
pub struct HandState {
    pub hand: Hand,
    discards: Vec<Tile>,
    check_furiten: bool,
}

impl HandState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears tiles and discards.
    pub fn clear(&mut self) {
        self.hand.clear();
        self.discards.clear();
    }

    /// Turning the check off forgets every recorded discard.
    pub fn set_check_furiten(&mut self, on: bool) {
        self.check_furiten = on;
        if !on {
            self.discards.clear();
        }
    }

    pub fn check_furiten(&self) -> bool {
        self.check_furiten
    }

    /// Ignored while the furiten check is off.
    pub fn add_discard(&mut self, tile: Tile) {
        if self.check_furiten {
            self.discards.push(tile);
        }
    }

    pub fn remove_discard(&mut self, index: usize) -> Option<Tile> {
        (index < self.discards.len()).then(|| self.discards.remove(index))
    }

    pub fn discards(&self) -> &[Tile] {
        &self.discards
    }

    /// Evaluates the current hand. `ctx.discards` and `ctx.check_furiten`
    /// are taken from this state.
    pub fn evaluate(&self, ctx: &WinContext) -> Result<ScoreResult, HandError> {
        if !self.hand.is_complete() {
            return Err(HandError::WrongTileCount(self.hand.len()));
        }
        let ctx = WinContext {
            discards: self.discards.clone(),
            check_furiten: self.check_furiten,
            ..ctx.clone()
        };
        Ok(evaluate(self.hand.tiles(), &ctx))
    }
}
