use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Wind {
    E,
    S,
    W,
    N,
}

impl Wind {
    pub const ALL: [Wind; 4] = [Wind::E, Wind::S, Wind::W, Wind::N];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Wind of the seat `offset` places after the dealer.
    pub fn from_offset(offset: usize) -> Wind {
        Self::ALL[offset % 4]
    }

    pub fn next(self) -> Option<Wind> {
        Self::ALL.get(self.index() + 1).copied()
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WinType {
    Ron,
    Tsumo,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SeatRole {
    Dealer,
    NonDealer,
}

impl SeatRole {
    pub fn is_dealer(self) -> bool {
        self == SeatRole::Dealer
    }
}

/// Situational flags chosen alongside the 14 tiles.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Conditions {
    pub riichi: bool,
    pub double_riichi: bool,
    pub ippatsu: bool,
    pub rinshan: bool,
    pub chankan: bool,
    /// Haitei on tsumo, houtei on ron.
    pub haitei: bool,
}

fn default_closed() -> bool {
    true
}

fn default_player_count() -> u8 {
    4
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoreRequest {
    pub tiles: Vec<String>,
    pub win_type: WinType,
    pub role: SeatRole,
    #[serde(default = "default_closed")]
    pub closed: bool,

    #[serde(default)]
    pub discards: Vec<String>,
    #[serde(default)]
    pub check_furiten: bool,

    #[serde(default)]
    pub conditions: Conditions,

    /// Table size, only used for the payment breakdown.
    #[serde(default = "default_player_count")]
    pub player_count: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct YakuEntry {
    pub yaku: Yaku,
    pub han: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Yaku {
    #[serde(rename = "Tsuuiisou")]
    Tsuuiisou,
    #[serde(rename = "Chiitoitsu")]
    Chiitoitsu,
    #[serde(rename = "Tanyao")]
    Tanyao,
    #[serde(rename = "Pinfu")]
    Pinfu,
    #[serde(rename = "Chinitsu")]
    Chinitsu,
    #[serde(rename = "Honitsu")]
    Honitsu,
    #[serde(rename = "Toitoi")]
    Toitoi,
    #[serde(rename = "Sanankou")]
    Sanankou,
    #[serde(rename = "Daisangen")]
    Daisangen,
    #[serde(rename = "Yakuhai")]
    Yakuhai,
    #[serde(rename = "Menzen Tsumo")]
    MenzenTsumo,
    #[serde(rename = "Double Riichi")]
    DoubleRiichi,
    #[serde(rename = "Riichi")]
    Riichi,
    #[serde(rename = "Ippatsu")]
    Ippatsu,
    #[serde(rename = "Rinshan Kaihou")]
    Rinshan,
    #[serde(rename = "Chankan")]
    Chankan,
    #[serde(rename = "Haitei")]
    Haitei,
    #[serde(rename = "Houtei")]
    Houtei,
}

impl Yaku {
    pub fn label(self) -> &'static str {
        match self {
            Yaku::Tsuuiisou => "Tsuuiisou",
            Yaku::Chiitoitsu => "Chiitoitsu",
            Yaku::Tanyao => "Tanyao",
            Yaku::Pinfu => "Pinfu",
            Yaku::Chinitsu => "Chinitsu",
            Yaku::Honitsu => "Honitsu",
            Yaku::Toitoi => "Toitoi",
            Yaku::Sanankou => "Sanankou",
            Yaku::Daisangen => "Daisangen",
            Yaku::Yakuhai => "Yakuhai",
            Yaku::MenzenTsumo => "Menzen Tsumo",
            Yaku::DoubleRiichi => "Double Riichi",
            Yaku::Riichi => "Riichi",
            Yaku::Ippatsu => "Ippatsu",
            Yaku::Rinshan => "Rinshan Kaihou",
            Yaku::Chankan => "Chankan",
            Yaku::Haitei => "Haitei",
            Yaku::Houtei => "Houtei",
        }
    }
}

/// Why an evaluation produced no score. These are ordinary outcomes, not panics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "reason")]
pub enum EvalError {
    Structural(InvalidReason),
    Furiten,
    NoYaku,
}

impl EvalError {
    pub fn message(&self) -> String {
        match self {
            EvalError::Structural(reason) => reason.to_string(),
            EvalError::Furiten => {
                "Furiten: a tile in the winning hand was discarded, ron is not allowed".into()
            }
            EvalError::NoYaku => {
                "No yaku detected: this hand has no valid scoring patterns".into()
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreResult {
    pub yaku: Vec<YakuEntry>,
    pub han: u32,
    pub fu: u32,
    pub is_error: bool,
    pub is_furiten: bool,
    pub error: Option<EvalError>,
    /// Human-readable label for `error`.
    pub message: Option<String>,
}

impl ScoreResult {
    pub fn failed(error: EvalError) -> Self {
        ScoreResult {
            yaku: vec![],
            han: 0,
            fu: 30,
            is_error: true,
            is_furiten: error == EvalError::Furiten,
            message: Some(error.message()),
            error: Some(error),
        }
    }

    pub fn has(&self, yaku: Yaku) -> bool {
        self.yaku.iter().any(|y| y.yaku == yaku)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub result: ScoreResult,
    pub payment: Option<Payment>,
    pub limit: Option<LimitHand>,
    pub breakdown: Option<PaymentBreakdown>,
}

mod decompose;
mod engine;
mod errors;
mod game;
mod hand;
mod points;
mod relay;
mod score;
mod snapshot;
mod tile;
mod yaku;

pub use decompose::{validate, InvalidReason, Validation};
pub use engine::{evaluate, WinContext};
pub use errors::{
    GameError, GameResult, HandError, RequestError, SnapshotError, TileError,
};
pub use game::{
    GameConfig, GameEvent, GameLength, GameState, Phase, Player, PlayerCount, WinRecord,
};
pub use hand::{Hand, HandState};
pub use points::{limit_hand, payment_breakdown, to_points, LimitHand, Payment, PaymentBreakdown};
pub use relay::{GuestView, HostSession, SnapshotChannel};
pub use score::score;
pub use snapshot::Snapshot;
pub use tile::{sort_tiles, Suit, Tile};
