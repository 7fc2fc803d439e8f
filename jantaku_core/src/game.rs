use crate::errors::{GameError, GameResult};
use crate::points::Payment;
use crate::{WinType, Wind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const RIICHI_STAKE: i32 = 1000;
const HONBA_RON: u32 = 300;
const HONBA_TSUMO_EACH: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlayerCount {
    Three,
    Four,
}

impl PlayerCount {
    pub fn seats(self) -> usize {
        match self {
            PlayerCount::Three => 3,
            PlayerCount::Four => 4,
        }
    }
}

impl TryFrom<u8> for PlayerCount {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            3 => Ok(PlayerCount::Three),
            4 => Ok(PlayerCount::Four),
            _ => Err(format!("unsupported player count: {}", n)),
        }
    }
}

impl From<PlayerCount> for u8 {
    fn from(p: PlayerCount) -> Self {
        p.seats() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameLength {
    /// 東風戦
    EastOnly,
    /// 半荘戦
    EastSouth,
}

impl GameLength {
    fn last_wind(self) -> Wind {
        match self {
            GameLength::EastOnly => Wind::E,
            GameLength::EastSouth => Wind::S,
        }
    }
}

/// Table rules. One state machine serves both 3- and 4-player games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: PlayerCount,
    pub starting_points: i32,
    pub game_length: GameLength,
    /// Points removed from the offender; nobody receives them.
    pub chombo_penalty: i32,
    /// Some tables shift seat winds even when the dealer keeps the deal.
    pub rotate_winds_on_renchan: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::four_player()
    }
}

impl GameConfig {
    pub fn four_player() -> Self {
        Self {
            mode: PlayerCount::Four,
            starting_points: 25000,
            game_length: GameLength::EastSouth,
            chombo_penalty: 8000,
            rotate_winds_on_renchan: false,
        }
    }

    pub fn sanma() -> Self {
        Self {
            mode: PlayerCount::Three,
            starting_points: 35000,
            game_length: GameLength::EastSouth,
            chombo_penalty: 8000,
            rotate_winds_on_renchan: false,
        }
    }

    pub fn seats(&self) -> usize {
        self.mode.seats()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Setup,
    Active,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub seat_wind: Wind,
    pub points: i32,
    pub in_riichi: bool,
}

/// A confirmed win, as entered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinRecord {
    pub winner: usize,
    /// Required for ron, ignored for tsumo.
    #[serde(default)]
    pub loser: Option<usize>,
    pub win_type: WinType,
    pub payment: Payment,
    pub winner_is_dealer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Start {
        #[serde(default)]
        names: Vec<String>,
    },
    Win(WinRecord),
    Draw,
    Riichi {
        seat: usize,
    },
    Nukidora {
        seat: usize,
    },
    Chombo {
        seat: usize,
    },
}

/// Authoritative table state. Only the host mutates it; guests get snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) phase: Phase,
    pub(crate) players: Vec<Player>,
    pub(crate) dealer_index: usize,
    pub(crate) round_wind: Wind,
    pub(crate) round_number: u32,
    pub(crate) honba: u32,
    pub(crate) riichi_sticks: u32,
    pub(crate) nukidora: BTreeMap<usize, u32>,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        GameState {
            config,
            phase: Phase::Setup,
            players: vec![],
            dealer_index: 0,
            round_wind: Wind::E,
            round_number: 1,
            honba: 0,
            riichi_sticks: 0,
            nukidora: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn dealer_index(&self) -> usize {
        self.dealer_index
    }

    pub fn round_wind(&self) -> Wind {
        self.round_wind
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn honba(&self) -> u32 {
        self.honba
    }

    pub fn riichi_sticks(&self) -> u32 {
        self.riichi_sticks
    }

    pub fn nukidora(&self, seat: usize) -> u32 {
        self.nukidora.get(&seat).copied().unwrap_or(0)
    }

    pub fn seats(&self) -> usize {
        self.config.seats()
    }

    /// Points on the table, riichi sticks included.
    pub fn total_points(&self) -> i64 {
        self.players.iter().map(|p| i64::from(p.points)).sum::<i64>()
            + i64::from(self.riichi_sticks) * i64::from(RIICHI_STAKE)
    }

    /// Players ordered by points, highest first. Ties keep seat order.
    pub fn standings(&self) -> Vec<&Player> {
        let mut v: Vec<&Player> = self.players.iter().collect();
        v.sort_by(|a, b| b.points.cmp(&a.points));
        v
    }

    pub fn apply(&mut self, event: &GameEvent) -> GameResult<()> {
        let res = match event {
            GameEvent::Start { names } => self.start(names),
            GameEvent::Win(rec) => self.apply_win(rec),
            GameEvent::Draw => self.record_draw(),
            GameEvent::Riichi { seat } => self.declare_riichi(*seat),
            GameEvent::Nukidora { seat } => self.declare_nukidora(*seat),
            GameEvent::Chombo { seat } => self.apply_chombo(*seat),
        };
        match &res {
            Ok(()) => tracing::debug!(?event, phase = ?self.phase, "event applied"),
            Err(e) => tracing::warn!(?event, error = %e, "event rejected"),
        }
        res
    }

    /// Setup -> Active. Seats without a name become `Player N`.
    pub fn start(&mut self, names: &[String]) -> GameResult<()> {
        match self.phase {
            Phase::Setup => {}
            Phase::Active => return Err(GameError::AlreadyStarted),
            Phase::Finished => return Err(GameError::Finished),
        }
        let seats = self.seats();
        if names.len() > seats {
            return Err(GameError::TooManyPlayers {
                given: names.len(),
                seats,
            });
        }

        self.players = (0..seats)
            .map(|i| Player {
                name: names
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("Player {}", i + 1)),
                seat_wind: Wind::from_offset(i),
                points: self.config.starting_points,
                in_riichi: false,
            })
            .collect();
        self.dealer_index = 0;
        self.round_wind = Wind::E;
        self.round_number = 1;
        self.honba = 0;
        self.riichi_sticks = 0;
        self.nukidora.clear();
        self.phase = Phase::Active;
        Ok(())
    }

    /// Settles a win, pays out the riichi pool and moves the round on.
    pub fn apply_win(&mut self, rec: &WinRecord) -> GameResult<()> {
        self.require_active()?;
        self.check_seat(rec.winner)?;
        if rec.winner_is_dealer != (rec.winner == self.dealer_index) {
            return Err(GameError::PaymentMismatch);
        }

        // validate everything before touching points
        let mut deltas = vec![0i32; self.players.len()];
        match (rec.win_type, rec.payment) {
            (WinType::Ron, Payment::Ron(points)) => {
                let loser = rec.loser.ok_or(GameError::MissingLoser)?;
                self.check_seat(loser)?;
                if loser == rec.winner {
                    return Err(GameError::SameWinnerAndLoser);
                }
                let amount = self.surcharged(points, HONBA_RON)?;
                deltas[loser] = -amount;
                deltas[rec.winner] = amount;
            }
            (WinType::Tsumo, Payment::TsumoAll(each)) if rec.winner_is_dealer => {
                let amount = self.surcharged(each, HONBA_TSUMO_EACH)?;
                for idx in (0..self.players.len()).filter(|&i| i != rec.winner) {
                    deltas[idx] = -amount;
                    deltas[rec.winner] = add_points(deltas[rec.winner], amount)?;
                }
            }
            (WinType::Tsumo, Payment::TsumoSplit { dealer, nondealer })
                if !rec.winner_is_dealer =>
            {
                let from_dealer = self.surcharged(dealer, HONBA_TSUMO_EACH)?;
                let from_other = self.surcharged(nondealer, HONBA_TSUMO_EACH)?;
                for idx in (0..self.players.len()).filter(|&i| i != rec.winner) {
                    let amount = if idx == self.dealer_index {
                        from_dealer
                    } else {
                        from_other
                    };
                    deltas[idx] = -amount;
                    deltas[rec.winner] = add_points(deltas[rec.winner], amount)?;
                }
            }
            _ => return Err(GameError::PaymentMismatch),
        }

        let pool = i32::try_from(self.riichi_sticks)
            .ok()
            .and_then(|n| n.checked_mul(RIICHI_STAKE))
            .ok_or(GameError::PointsOutOfRange)?;
        deltas[rec.winner] = add_points(deltas[rec.winner], pool)?;
        let settled = self
            .players
            .iter()
            .zip(&deltas)
            .map(|(p, &d)| add_points(p.points, d))
            .collect::<GameResult<Vec<i32>>>()?;

        for (p, points) in self.players.iter_mut().zip(settled) {
            p.points = points;
            p.in_riichi = false;
        }
        self.riichi_sticks = 0;
        self.nukidora.clear();

        self.advance_round(rec.winner);
        Ok(())
    }

    /// Base payment plus the honba surcharge, as a point delta.
    fn surcharged(&self, base: u32, per_honba: u32) -> GameResult<i32> {
        self.honba
            .checked_mul(per_honba)
            .and_then(|s| s.checked_add(base))
            .and_then(|total| i32::try_from(total).ok())
            .ok_or(GameError::PointsOutOfRange)
    }

    /// 流局: one more honba, nothing else moves.
    pub fn record_draw(&mut self) -> GameResult<()> {
        self.require_active()?;
        self.honba += 1;
        Ok(())
    }

    pub fn declare_riichi(&mut self, seat: usize) -> GameResult<()> {
        self.require_active()?;
        self.check_seat(seat)?;
        let p = &mut self.players[seat];
        if p.in_riichi {
            return Err(GameError::AlreadyInRiichi { seat });
        }
        if p.points < RIICHI_STAKE {
            return Err(GameError::InsufficientPoints {
                seat,
                points: p.points,
            });
        }
        p.points -= RIICHI_STAKE;
        p.in_riichi = true;
        self.riichi_sticks += 1;
        Ok(())
    }

    /// 抜きドラ (three-player only): one more marker for the seat.
    pub fn declare_nukidora(&mut self, seat: usize) -> GameResult<()> {
        if self.config.mode != PlayerCount::Three {
            return Err(GameError::NukidoraRequiresThreePlayer);
        }
        self.require_active()?;
        self.check_seat(seat)?;
        *self.nukidora.entry(seat).or_insert(0) += 1;
        Ok(())
    }

    /// Penalty points are removed from the table, never below zero.
    pub fn apply_chombo(&mut self, seat: usize) -> GameResult<()> {
        self.require_active()?;
        self.check_seat(seat)?;
        let penalty = self.config.chombo_penalty;
        let p = &mut self.players[seat];
        p.points = if p.points >= penalty {
            p.points - penalty
        } else {
            0
        };
        Ok(())
    }

    fn advance_round(&mut self, winner: usize) {
        // 連荘
        if winner == self.dealer_index {
            self.honba += 1;
            if self.config.rotate_winds_on_renchan {
                self.rotate_seat_winds();
            }
            return;
        }

        self.dealer_index = (self.dealer_index + 1) % self.seats();
        self.honba = 0;
        self.rotate_seat_winds();

        if self.dealer_index != 0 {
            self.round_number += 1;
            return;
        }

        if self.round_wind < self.config.game_length.last_wind() {
            if let Some(next) = self.round_wind.next() {
                self.round_wind = next;
            }
            self.round_number = 1;
        } else {
            self.phase = Phase::Finished;
            tracing::info!(round_wind = ?self.round_wind, "game finished");
        }
    }

    /// Every seat moves one wind back: S becomes E, E becomes the last wind.
    fn rotate_seat_winds(&mut self) {
        let seats = self.seats();
        for p in &mut self.players {
            p.seat_wind = Wind::from_offset((p.seat_wind.index() + seats - 1) % seats);
        }
    }

    fn require_active(&self) -> GameResult<()> {
        match self.phase {
            Phase::Setup => Err(GameError::NotStarted),
            Phase::Active => Ok(()),
            Phase::Finished => Err(GameError::Finished),
        }
    }

    fn check_seat(&self, seat: usize) -> GameResult<()> {
        if seat < self.players.len() {
            Ok(())
        } else {
            Err(GameError::SeatOutOfRange {
                seat,
                seats: self.players.len(),
            })
        }
    }
}

fn add_points(points: i32, delta: i32) -> GameResult<i32> {
    points
        .checked_add(delta)
        .ok_or(GameError::PointsOutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(config: GameConfig) -> GameState {
        let mut g = GameState::new(config);
        g.start(&[]).unwrap();
        g
    }

    fn ron(winner: usize, loser: usize, points: u32, g: &GameState) -> WinRecord {
        WinRecord {
            winner,
            loser: Some(loser),
            win_type: WinType::Ron,
            payment: Payment::Ron(points),
            winner_is_dealer: winner == g.dealer_index(),
        }
    }

    fn points(g: &GameState) -> Vec<i32> {
        g.players().iter().map(|p| p.points).collect()
    }

    fn winds(g: &GameState) -> Vec<Wind> {
        g.players().iter().map(|p| p.seat_wind).collect()
    }

    #[test]
    fn start_seats_players() {
        let mut g = GameState::new(GameConfig::four_player());
        g.start(&["Aki".to_string(), "Ren".to_string()]).unwrap();
        assert_eq!(g.phase(), Phase::Active);
        assert_eq!(g.players()[0].name, "Aki");
        assert_eq!(g.players()[3].name, "Player 4");
        assert_eq!(winds(&g), vec![Wind::E, Wind::S, Wind::W, Wind::N]);
        assert_eq!(points(&g), vec![25000; 4]);
        assert_eq!(g.start(&[]), Err(GameError::AlreadyStarted));
    }

    #[test]
    fn too_many_names_rejected() {
        let mut g = GameState::new(GameConfig::sanma());
        let names: Vec<String> = (0..4).map(|i| i.to_string()).collect();
        assert_eq!(
            g.start(&names),
            Err(GameError::TooManyPlayers { given: 4, seats: 3 })
        );
        assert_eq!(g.phase(), Phase::Setup);
    }

    #[test]
    fn events_need_an_active_game() {
        let mut g = GameState::new(GameConfig::four_player());
        assert_eq!(g.record_draw(), Err(GameError::NotStarted));
        assert_eq!(g.declare_riichi(0), Err(GameError::NotStarted));
    }

    #[test]
    fn dealer_ron_with_honba_and_sticks() {
        let mut g = started(GameConfig::four_player());
        g.record_draw().unwrap();
        g.record_draw().unwrap();
        g.declare_riichi(0).unwrap();
        g.declare_riichi(1).unwrap();
        g.declare_riichi(2).unwrap();
        assert_eq!(g.riichi_sticks(), 3);

        g.apply_win(&ron(0, 3, 12000, &g)).unwrap();

        // 24000 + 12000 + 600 + 3000
        assert_eq!(points(&g), vec![39600, 24000, 24000, 12400]);
        assert_eq!(g.riichi_sticks(), 0);
        assert!(g.players().iter().all(|p| !p.in_riichi));
        // renchan
        assert_eq!(g.dealer_index(), 0);
        assert_eq!(g.honba(), 3);
        assert_eq!(winds(&g), vec![Wind::E, Wind::S, Wind::W, Wind::N]);
    }

    #[test]
    fn non_dealer_win_passes_the_deal() {
        let mut g = started(GameConfig::four_player());
        g.record_draw().unwrap();
        g.apply_win(&ron(2, 0, 3900, &g)).unwrap();

        assert_eq!(points(&g), vec![25000 - 4200, 25000, 25000 + 4200, 25000]);
        assert_eq!(g.dealer_index(), 1);
        assert_eq!(g.honba(), 0);
        assert_eq!(g.round_number(), 2);
        assert_eq!(winds(&g), vec![Wind::N, Wind::E, Wind::S, Wind::W]);
    }

    #[test]
    fn non_dealer_tsumo_split() {
        let mut g = started(GameConfig::four_player());
        g.record_draw().unwrap();
        g.apply_win(&WinRecord {
            winner: 1,
            loser: None,
            win_type: WinType::Tsumo,
            payment: Payment::TsumoSplit {
                dealer: 2000,
                nondealer: 1000,
            },
            winner_is_dealer: false,
        })
        .unwrap();
        assert_eq!(points(&g), vec![22900, 29300, 23900, 23900]);
    }

    #[test]
    fn dealer_tsumo_all_in_sanma() {
        let mut g = started(GameConfig::sanma());
        g.apply_win(&WinRecord {
            winner: 0,
            loser: None,
            win_type: WinType::Tsumo,
            payment: Payment::TsumoAll(4000),
            winner_is_dealer: true,
        })
        .unwrap();
        assert_eq!(points(&g), vec![43000, 31000, 31000]);
        assert_eq!(g.honba(), 1);
    }

    #[test]
    fn invalid_wins_leave_state_alone() {
        let mut g = started(GameConfig::four_player());
        let before = g.clone();

        let mut rec = ron(1, 1, 1000, &g);
        assert_eq!(g.apply_win(&rec), Err(GameError::SameWinnerAndLoser));
        rec.loser = None;
        assert_eq!(g.apply_win(&rec), Err(GameError::MissingLoser));
        rec.loser = Some(7);
        assert!(matches!(
            g.apply_win(&rec),
            Err(GameError::SeatOutOfRange { seat: 7, .. })
        ));
        rec.loser = Some(0);
        rec.payment = Payment::TsumoAll(1000);
        assert_eq!(g.apply_win(&rec), Err(GameError::PaymentMismatch));

        assert_eq!(g, before);
    }

    #[test]
    fn riichi_rules() {
        let mut g = started(GameConfig::four_player());
        g.declare_riichi(1).unwrap();
        assert_eq!(g.players()[1].points, 24000);
        assert_eq!(g.declare_riichi(1), Err(GameError::AlreadyInRiichi { seat: 1 }));

        g.players[2].points = 999;
        assert_eq!(
            g.declare_riichi(2),
            Err(GameError::InsufficientPoints { seat: 2, points: 999 })
        );
        assert_eq!(g.riichi_sticks(), 1);
    }

    #[test]
    fn riichi_pool_survives_draws() {
        let mut g = started(GameConfig::four_player());
        g.declare_riichi(3).unwrap();
        g.record_draw().unwrap();
        assert_eq!(g.riichi_sticks(), 1);
        assert_eq!(g.dealer_index(), 0);
        assert_eq!(g.honba(), 1);
    }

    #[test]
    fn chombo_floors_at_zero_and_destroys_points() {
        let mut g = started(GameConfig::four_player());
        g.players[2].points = 3000;
        g.apply_chombo(2).unwrap();
        assert_eq!(points(&g), vec![25000, 25000, 0, 25000]);

        g.apply_chombo(0).unwrap();
        assert_eq!(g.players()[0].points, 17000);
    }

    #[test]
    fn nukidora_only_in_sanma_and_reset_on_win() {
        let mut four = started(GameConfig::four_player());
        assert_eq!(
            four.declare_nukidora(0),
            Err(GameError::NukidoraRequiresThreePlayer)
        );

        let mut g = started(GameConfig::sanma());
        g.declare_nukidora(1).unwrap();
        g.declare_nukidora(1).unwrap();
        g.declare_nukidora(2).unwrap();
        assert_eq!(g.nukidora(1), 2);
        assert_eq!(g.nukidora(2), 1);
        assert_eq!(points(&g), vec![35000; 3]);

        g.apply_win(&ron(1, 2, 8000, &g)).unwrap();
        assert_eq!(g.nukidora(1), 0);
    }

    #[test]
    fn east_only_finishes_after_last_dealer() {
        let mut config = GameConfig::four_player();
        config.game_length = GameLength::EastOnly;
        let mut g = started(config);

        for round in 1..=4 {
            assert_eq!(g.round_number(), round);
            let dealer = g.dealer_index();
            let winner = (dealer + 1) % 4;
            g.apply_win(&ron(winner, dealer, 1000, &g)).unwrap();
        }
        assert_eq!(g.phase(), Phase::Finished);
        assert_eq!(g.record_draw(), Err(GameError::Finished));
    }

    #[test]
    fn east_south_moves_to_south_round() {
        let mut g = started(GameConfig::sanma());
        for _ in 0..3 {
            let dealer = g.dealer_index();
            g.apply_win(&ron((dealer + 1) % 3, dealer, 1000, &g)).unwrap();
        }
        assert_eq!(g.phase(), Phase::Active);
        assert_eq!(g.round_wind(), Wind::S);
        assert_eq!(g.round_number(), 1);
        assert_eq!(g.dealer_index(), 0);
        assert_eq!(winds(&g), vec![Wind::E, Wind::S, Wind::W]);

        for _ in 0..3 {
            let dealer = g.dealer_index();
            g.apply_win(&ron((dealer + 1) % 3, dealer, 1000, &g)).unwrap();
        }
        assert_eq!(g.phase(), Phase::Finished);
    }

    #[test]
    fn renchan_wind_rotation_is_configurable() {
        let mut config = GameConfig::four_player();
        config.rotate_winds_on_renchan = true;
        let mut g = started(config);
        g.apply_win(&ron(0, 1, 12000, &g)).unwrap();
        assert_eq!(g.dealer_index(), 0);
        assert_eq!(winds(&g), vec![Wind::N, Wind::E, Wind::S, Wind::W]);
    }

    #[test]
    fn sanma_winds_stay_east_south_west() {
        let mut g = started(GameConfig::sanma());
        g.apply_win(&ron(1, 0, 2000, &g)).unwrap();
        assert_eq!(g.dealer_index(), 1);
        assert_eq!(winds(&g), vec![Wind::W, Wind::E, Wind::S]);

        g.apply_win(&ron(0, 1, 2000, &g)).unwrap();
        assert_eq!(winds(&g), vec![Wind::S, Wind::W, Wind::E]);
        assert!(g.players().iter().all(|p| p.seat_wind != Wind::N));
    }

    #[test]
    fn oversized_payments_are_rejected() {
        let mut g = started(GameConfig::four_player());
        let before = g.clone();

        let rec = ron(1, 0, 3_000_000_000, &g);
        assert_eq!(g.apply_win(&rec), Err(GameError::PointsOutOfRange));

        // fits in i32 on its own, but not on top of the winner's balance
        let rec = ron(1, 0, i32::MAX as u32, &g);
        assert_eq!(g.apply_win(&rec), Err(GameError::PointsOutOfRange));

        g.honba = u32::MAX / 100;
        let rec = WinRecord {
            winner: 2,
            loser: None,
            win_type: WinType::Tsumo,
            payment: Payment::TsumoSplit {
                dealer: 1000,
                nondealer: 500,
            },
            winner_is_dealer: false,
        };
        assert_eq!(g.apply_win(&rec), Err(GameError::PointsOutOfRange));

        g.honba = 0;
        assert_eq!(g, before);
    }

    #[test]
    fn dealer_flag_must_match_the_table() {
        let mut g = started(GameConfig::four_player());
        let before = g.clone();

        let mut rec = ron(2, 1, 1000, &g);
        rec.winner_is_dealer = true;
        assert_eq!(g.apply_win(&rec), Err(GameError::PaymentMismatch));

        let tsumo = |winner, payment, winner_is_dealer| WinRecord {
            winner,
            loser: None,
            win_type: WinType::Tsumo,
            payment,
            winner_is_dealer,
        };
        // non-dealer claiming a dealer-style payment
        assert_eq!(
            g.apply_win(&tsumo(1, Payment::TsumoAll(1000), false)),
            Err(GameError::PaymentMismatch)
        );
        // dealer claiming a split
        let split = Payment::TsumoSplit {
            dealer: 1000,
            nondealer: 500,
        };
        assert_eq!(
            g.apply_win(&tsumo(0, split, true)),
            Err(GameError::PaymentMismatch)
        );
        assert_eq!(
            g.apply_win(&tsumo(3, split, true)),
            Err(GameError::PaymentMismatch)
        );
        assert_eq!(g, before);
    }

    #[test]
    fn standings_sort_by_points() {
        let mut g = started(GameConfig::four_player());
        g.apply_win(&ron(2, 1, 8000, &g)).unwrap();
        let order: Vec<&str> = g.standings().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(order, vec!["Player 3", "Player 1", "Player 4", "Player 2"]);
    }

    #[test]
    fn events_deserialize_from_tagged_json() {
        let ev: GameEvent = serde_json::from_str(
            r#"{"type":"win","winner":1,"loser":0,"win_type":"ron","payment":{"ron":3900},"winner_is_dealer":false}"#,
        )
        .unwrap();
        assert!(matches!(ev, GameEvent::Win(WinRecord { winner: 1, .. })));

        let ev: GameEvent = serde_json::from_str(r#"{"type":"riichi","seat":2}"#).unwrap();
        assert_eq!(ev, GameEvent::Riichi { seat: 2 });
    }
}
