use crate::errors::SnapshotError;
use crate::game::{GameConfig, GameState, Phase, Player, PlayerCount};
use crate::Wind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire form of a `GameState`: what the host broadcasts and guests replace
/// their view with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub config: GameConfig,
    pub players: Vec<Player>,
    pub dealer_index: usize,
    pub round_wind: Wind,
    pub round_number: u32,
    pub honba: u32,
    pub riichi_sticks: u32,
    #[serde(default)]
    pub nukidora_by_seat: BTreeMap<usize, u32>,
    pub started: bool,
    #[serde(default)]
    pub finished: bool,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(s)?)
    }
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(self)
    }
}

impl From<&GameState> for Snapshot {
    fn from(g: &GameState) -> Self {
        Snapshot {
            config: g.config.clone(),
            players: g.players.clone(),
            dealer_index: g.dealer_index,
            round_wind: g.round_wind,
            round_number: g.round_number,
            honba: g.honba,
            riichi_sticks: g.riichi_sticks,
            nukidora_by_seat: g.nukidora.clone(),
            started: g.phase != Phase::Setup,
            finished: g.phase == Phase::Finished,
        }
    }
}

impl TryFrom<Snapshot> for GameState {
    type Error = SnapshotError;

    fn try_from(s: Snapshot) -> Result<Self, Self::Error> {
        let seats = s.config.seats();
        let invalid = |message: String| -> Result<GameState, SnapshotError> {
            Err(SnapshotError::InvalidState { message })
        };

        let phase = match (s.started, s.finished) {
            (false, false) => Phase::Setup,
            (true, false) => Phase::Active,
            (true, true) => Phase::Finished,
            (false, true) => return invalid("finished game that never started".into()),
        };
        if phase == Phase::Setup && !s.players.is_empty() {
            return invalid("players seated before the game started".into());
        }
        if phase != Phase::Setup && s.players.len() != seats {
            return invalid(format!(
                "{} players for a {}-seat table",
                s.players.len(),
                seats
            ));
        }
        if s.dealer_index >= seats {
            return invalid(format!("dealer index {} out of range", s.dealer_index));
        }
        if !s.nukidora_by_seat.is_empty() && s.config.mode != PlayerCount::Three {
            return invalid("nukidora recorded in a four-player game".into());
        }
        if let Some(seat) = s.nukidora_by_seat.keys().find(|&&k| k >= seats) {
            return invalid(format!("nukidora for unknown seat {}", seat));
        }

        Ok(GameState {
            config: s.config,
            phase,
            players: s.players,
            dealer_index: s.dealer_index,
            round_wind: s.round_wind,
            round_number: s.round_number,
            honba: s.honba,
            riichi_sticks: s.riichi_sticks,
            nukidora: s.nukidora_by_seat,
        })
    }
}
