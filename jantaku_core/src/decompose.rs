use crate::tile::Tile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Tile multiset keyed in display order, so the first key is always the
/// smallest remaining tile.
pub type TileCounts = BTreeMap<Tile, u8>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    TooManyCopies,
    NoValidPartition,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::TooManyCopies => {
                write!(f, "Invalid hand: cannot have more than 4 of the same tile")
            }
            InvalidReason::NoValidPartition => write!(
                f,
                "Invalid hand: does not form a valid winning pattern (4 sets + 1 pair)"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(InvalidReason),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }
}

pub fn count_tiles(tiles: &[Tile]) -> TileCounts {
    let mut map = TileCounts::new();
    for t in tiles {
        *map.entry(*t).or_insert(0) += 1;
    }
    map
}

/// 七対子: seven distinct keys, each held exactly twice.
pub fn is_seven_pairs(counts: &TileCounts) -> bool {
    counts.len() == 7 && counts.values().all(|&c| c == 2)
}

/// Checks that 14 tiles form 4 sets + 1 pair, or seven pairs.
///
/// The input is only read; calling twice on the same slice gives the same answer.
pub fn validate(tiles: &[Tile]) -> Validation {
    let counts = count_tiles(tiles);

    if counts.values().any(|&c| c > 4) {
        return Validation::Invalid(InvalidReason::TooManyCopies);
    }

    if is_seven_pairs(&counts) {
        return Validation::Valid;
    }

    if can_form_winning_hand(&counts) {
        Validation::Valid
    } else {
        Validation::Invalid(InvalidReason::NoValidPartition)
    }
}

/// Tries every key with two or more copies as the pair (雀頭), then looks for
/// 4 sets in what is left.
pub fn can_form_winning_hand(counts: &TileCounts) -> bool {
    counts
        .iter()
        .filter(|(_, &c)| c >= 2)
        .any(|(&pair, _)| can_form_sets(&take(counts, &[(pair, 2)]), 4))
}

/// Recursive set search. Each call works on its own copy of the counts.
///
/// Only the smallest remaining key is expanded: it must start either a
/// triplet or a run, otherwise the branch fails.
pub fn can_form_sets(counts: &TileCounts, num_sets: usize) -> bool {
    if num_sets == 0 {
        return counts.is_empty();
    }

    let Some((&first, &count)) = counts.iter().next() else {
        return false;
    };

    // 刻子
    if count >= 3 && can_form_sets(&take(counts, &[(first, 3)]), num_sets - 1) {
        return true;
    }

    // 順子 (lowest rank of the run is at most 7)
    if first.suit().is_numeric() && first.rank() <= 7 {
        if let (Some(t2), Some(t3)) = (first.next(), first.next2()) {
            if counts.contains_key(&t2)
                && counts.contains_key(&t3)
                && can_form_sets(&take(counts, &[(first, 1), (t2, 1), (t3, 1)]), num_sets - 1)
            {
                return true;
            }
        }
    }

    false
}

/// Copy of `counts` with the given amounts removed; emptied keys are dropped.
fn take(counts: &TileCounts, removals: &[(Tile, u8)]) -> TileCounts {
    let mut next = counts.clone();
    for &(tile, n) in removals {
        if let Some(c) = next.get_mut(&tile) {
            *c -= n;
            if *c == 0 {
                next.remove(&tile);
            }
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(codes: &[&str]) -> Vec<Tile> {
        codes.iter().map(|c| Tile::from_code(c).unwrap()).collect()
    }

    #[test]
    fn standard_hand_is_valid() {
        let h = tiles(&[
            "1m", "2m", "3m", "4p", "5p", "6p", "7s", "8s", "9s", "E", "E", "E", "5m", "5m",
        ]);
        assert_eq!(validate(&h), Validation::Valid);
    }

    #[test]
    fn seven_pairs_is_valid() {
        let h = tiles(&[
            "1m", "1m", "3p", "3p", "5s", "5s", "9s", "9s", "E", "E", "P", "P", "C", "C",
        ]);
        assert_eq!(validate(&h), Validation::Valid);
    }

    #[test]
    fn fifth_copy_is_rejected_first() {
        let h = tiles(&[
            "1m", "1m", "1m", "1m", "1m", "2m", "3m", "4m", "5m", "6m", "7m", "8m", "9m", "9m",
        ]);
        assert_eq!(validate(&h), Validation::Invalid(InvalidReason::TooManyCopies));
    }

    #[test]
    fn scattered_tiles_have_no_partition() {
        let h = tiles(&[
            "1m", "4m", "7m", "1p", "4p", "7p", "1s", "4s", "7s", "E", "S", "W", "N", "N",
        ]);
        assert_eq!(
            validate(&h),
            Validation::Invalid(InvalidReason::NoValidPartition)
        );
    }

    #[test]
    fn runs_do_not_wrap_or_cross_suits() {
        let h = tiles(&[
            "8m", "9m", "1p", "2p", "3p", "4p", "5p", "6p", "7p", "8p", "9p", "E", "E", "E",
        ]);
        assert!(!validate(&h).is_valid());
    }

    #[test]
    fn honors_never_form_runs() {
        let h = tiles(&[
            "E", "S", "W", "1m", "2m", "3m", "4m", "5m", "6m", "7m", "8m", "9m", "P", "P",
        ]);
        assert!(!validate(&h).is_valid());
    }

    #[test]
    fn pure_nine_gates_shape_needs_backtracking() {
        // 1112345678999 + 5
        let h = tiles(&[
            "1m", "1m", "1m", "2m", "3m", "4m", "5m", "5m", "6m", "7m", "8m", "9m", "9m", "9m",
        ]);
        assert!(validate(&h).is_valid());
    }

    #[test]
    fn validation_does_not_touch_input() {
        let h = tiles(&[
            "2m", "2m", "2m", "3m", "3m", "3m", "4m", "4m", "4m", "6p", "7p", "8p", "9s", "9s",
        ]);
        let before = h.clone();
        let a = validate(&h);
        let b = validate(&h);
        assert_eq!(a, b);
        assert_eq!(h, before);
    }
}
