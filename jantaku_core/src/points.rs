use crate::WinType;
use serde::{Deserialize, Serialize};

/// What the winner is owed, before honba and riichi sticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payment {
    /// Discarder pays the whole amount.
    Ron(u32),
    /// Dealer tsumo: every other seat pays the same.
    TsumoAll(u32),
    /// Non-dealer tsumo: the dealer pays more than the other seats.
    TsumoSplit { dealer: u32, nondealer: u32 },
}

impl Payment {
    /// Total received from a table of `players` seats.
    pub fn total(&self, players: u32) -> u32 {
        match *self {
            Payment::Ron(p) => p,
            Payment::TsumoAll(each) => each * players.saturating_sub(1),
            Payment::TsumoSplit { dealer, nondealer } => {
                dealer + nondealer * players.saturating_sub(2)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitHand {
    Mangan,
    Haneman,
    Baiman,
    Sanbaiman,
    Yakuman,
}

/// Han to limit-hand name; `None` below 5 han.
pub fn limit_hand(han: u32) -> Option<LimitHand> {
    if han >= 13 {
        Some(LimitHand::Yakuman)
    } else if han >= 11 {
        Some(LimitHand::Sanbaiman)
    } else if han >= 8 {
        Some(LimitHand::Baiman)
    } else if han >= 6 {
        Some(LimitHand::Haneman)
    } else if han >= 5 {
        Some(LimitHand::Mangan)
    } else {
        None
    }
}

/// Converts han/fu into a payment (rounded up to 100).
///
/// Limit rows are checked from the top; below 5 han the base
/// `fu * 2^(2+han)` is capped at mangan once it reaches 2000.
pub fn to_points(han: u32, fu: u32, dealer: bool, win_type: WinType) -> Payment {
    // (dealer ron, dealer tsumo each, non-dealer ron, non-dealer tsumo dealer/other)
    let limit = match limit_hand(han) {
        Some(LimitHand::Yakuman) => Some((48000, 16000, 32000, 16000, 8000)),
        Some(LimitHand::Sanbaiman) => Some((36000, 12000, 24000, 12000, 6000)),
        Some(LimitHand::Baiman) => Some((24000, 8000, 16000, 8000, 4000)),
        Some(LimitHand::Haneman) => Some((18000, 6000, 12000, 6000, 3000)),
        Some(LimitHand::Mangan) => Some(MANGAN),
        None => None,
    };

    let row = match limit {
        Some(row) => row,
        None => {
            let base = fu.saturating_mul(1u32 << (2 + han));
            if base >= 2000 {
                MANGAN
            } else {
                return base_to_payment(base, dealer, win_type);
            }
        }
    };

    let (dealer_ron, dealer_each, ron, tsumo_dealer, tsumo_other) = row;
    match (win_type, dealer) {
        (WinType::Ron, true) => Payment::Ron(dealer_ron),
        (WinType::Ron, false) => Payment::Ron(ron),
        (WinType::Tsumo, true) => Payment::TsumoAll(dealer_each),
        (WinType::Tsumo, false) => Payment::TsumoSplit {
            dealer: tsumo_dealer,
            nondealer: tsumo_other,
        },
    }
}

const MANGAN: (u32, u32, u32, u32, u32) = (12000, 4000, 8000, 4000, 2000);

fn base_to_payment(base: u32, dealer: bool, win_type: WinType) -> Payment {
    match (win_type, dealer) {
        (WinType::Ron, true) => Payment::Ron(round_up_100(base * 6)),
        (WinType::Ron, false) => Payment::Ron(round_up_100(base * 4)),
        (WinType::Tsumo, true) => Payment::TsumoAll(round_up_100(base * 2)),
        (WinType::Tsumo, false) => Payment::TsumoSplit {
            dealer: round_up_100(base * 2),
            nondealer: round_up_100(base),
        },
    }
}

fn round_up_100(x: u32) -> u32 {
    x.div_ceil(100) * 100
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentBreakdown {
    pub total_points: u32,
    pub payments: Vec<String>, // e.g. ["Dealer pays: 3900", "Non-dealers pay: 2000 each"]
}

/// Who pays what at a table of `players` seats.
pub fn payment_breakdown(payment: Payment, players: u32) -> PaymentBreakdown {
    let mut payments = vec![];
    match payment {
        Payment::Ron(p) => payments.push(format!("Discarder pays: {}", p)),
        Payment::TsumoAll(each) => payments.push(format!("Each player pays: {}", each)),
        Payment::TsumoSplit { dealer, nondealer } => {
            payments.push(format!("Dealer pays: {}", dealer));
            payments.push(format!("Non-dealers pay: {} each", nondealer));
        }
    }
    PaymentBreakdown {
        total_points: payment.total(players),
        payments,
    }
}
