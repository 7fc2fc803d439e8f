use crate::decompose::{count_tiles, is_seven_pairs, TileCounts};
use crate::engine::WinContext;
use crate::tile::{Suit, Tile};
use crate::{WinType, Yaku, YakuEntry};
use std::collections::BTreeSet;

pub const YAKUMAN_HAN: u32 = 13;

#[derive(Debug, Clone)]
pub struct YakuResult {
    pub han: u32,
    pub fu: u32,
    pub yaku: Vec<YakuEntry>,
}

impl YakuResult {
    fn new() -> Self {
        YakuResult {
            han: 0,
            fu: 30,
            yaku: vec![],
        }
    }

    fn push(&mut self, yaku: Yaku, han: u32) {
        self.yaku.push(YakuEntry { yaku, han });
        self.han += han;
    }
}

/// Yaku table for a structurally valid hand.
///
/// Only all-honors and big three dragons short-circuit; every other check
/// runs in order and adds to the total.
pub fn eval_yaku(tiles: &[Tile], ctx: &WinContext) -> YakuResult {
    let mut r = YakuResult::new();
    let counts = count_tiles(tiles);

    // ===== 字一色 =====
    if tiles.iter().all(|t| t.is_honor()) {
        r.push(Yaku::Tsuuiisou, YAKUMAN_HAN);
        return r;
    }

    // ===== 七対子 =====
    let seven_pairs = is_seven_pairs(&counts);
    if seven_pairs {
        r.push(Yaku::Chiitoitsu, 2);
        r.fu = 25;
    }

    // ===== 断么九 =====
    if tiles.iter().all(|t| t.is_simple()) {
        r.push(Yaku::Tanyao, 1);
    }

    // ===== 平和（門前限定） =====
    let mut pinfu = false;
    if ctx.closed && !seven_pairs && is_pinfu_shape(&counts) {
        r.push(Yaku::Pinfu, 1);
        r.fu = 30;
        pinfu = true;
    }

    // ===== 混一色 / 清一色（喰い下がり） =====
    if let Some((yaku, h)) = honitsu_chinitsu(tiles, ctx.closed) {
        r.push(yaku, h);
    }

    // ===== 対々和 / 三暗刻 =====
    match count_triplets(&counts) {
        4 => r.push(Yaku::Toitoi, 2),
        3 => r.push(Yaku::Sanankou, 2),
        _ => {}
    }

    // ===== 大三元 / 役牌 =====
    let dragon_triplets = count_dragon_triplets(&counts);
    if dragon_triplets == 3 {
        r.push(Yaku::Daisangen, YAKUMAN_HAN);
        r.han = YAKUMAN_HAN;
        return r;
    }
    for _ in 0..dragon_triplets {
        r.push(Yaku::Yakuhai, 1);
    }

    // ===== 門前清自摸和 =====
    if ctx.win_type == WinType::Tsumo && ctx.closed && !pinfu && !seven_pairs {
        r.push(Yaku::MenzenTsumo, 1);
    }

    // ===== 状況役 =====
    let c = &ctx.conditions;
    if c.double_riichi {
        r.push(Yaku::DoubleRiichi, 2);
    } else if c.riichi {
        r.push(Yaku::Riichi, 1);
    }
    if c.ippatsu && (c.riichi || c.double_riichi) {
        r.push(Yaku::Ippatsu, 1);
    }
    if c.rinshan {
        r.push(Yaku::Rinshan, 1);
    }
    if c.chankan {
        r.push(Yaku::Chankan, 1);
    }
    if c.haitei {
        let y = match ctx.win_type {
            WinType::Tsumo => Yaku::Haitei,
            WinType::Ron => Yaku::Houtei,
        };
        r.push(y, 1);
    }

    r
}

// =====================
// ヘルパー群
// =====================

/// Pinfu shape without wait analysis: one pair, not an honor, no triplets,
/// and no honor tiles anywhere else.
fn is_pinfu_shape(counts: &TileCounts) -> bool {
    let pairs: Vec<&Tile> = counts
        .iter()
        .filter(|(_, &c)| c == 2)
        .map(|(t, _)| t)
        .collect();
    if pairs.len() != 1 {
        return false;
    }
    let pair = pairs[0];
    if pair.is_honor() {
        return false;
    }
    if counts.values().any(|&c| c >= 3) {
        return false;
    }
    !counts.keys().any(|t| t != pair && t.is_honor())
}

/// One numeric suit alone is chinitsu; one numeric suit plus a single honor
/// kind (winds or dragons, not both) is honitsu.
fn honitsu_chinitsu(tiles: &[Tile], closed: bool) -> Option<(Yaku, u32)> {
    let suits: BTreeSet<Suit> = tiles.iter().map(|t| t.suit()).collect();
    let numeric = suits.iter().filter(|s| s.is_numeric()).count();
    let honors = suits.len() - numeric;

    match (numeric, honors) {
        (1, 0) => Some((Yaku::Chinitsu, if closed { 6 } else { 5 })),
        (1, 1) => Some((Yaku::Honitsu, if closed { 3 } else { 2 })),
        _ => None,
    }
}

fn count_triplets(counts: &TileCounts) -> usize {
    counts.values().filter(|&&c| c >= 3).count()
}

fn count_dragon_triplets(counts: &TileCounts) -> usize {
    counts
        .iter()
        .filter(|(t, &c)| t.is_dragon() && c >= 3)
        .count()
}
