use crate::decompose::{validate, Validation};
use crate::tile::Tile;
use crate::yaku::eval_yaku;
use crate::{Conditions, EvalError, ScoreResult, SeatRole, WinType};

/// Everything besides the tiles that decides a hand's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinContext {
    pub win_type: WinType,
    pub role: SeatRole,
    pub closed: bool,
    pub discards: Vec<Tile>,
    pub check_furiten: bool,
    pub conditions: Conditions,
}

impl WinContext {
    pub fn new(win_type: WinType, role: SeatRole) -> Self {
        WinContext {
            win_type,
            role,
            closed: true,
            discards: vec![],
            check_furiten: false,
            conditions: Conditions::default(),
        }
    }
}

/// Evaluates exactly 14 tiles. Callers must enforce the tile count.
///
/// Structural, furiten and no-yaku failures come back as an error
/// `ScoreResult` with `han == 0`.
pub fn evaluate(tiles: &[Tile], ctx: &WinContext) -> ScoreResult {
    if let Validation::Invalid(reason) = validate(tiles) {
        return ScoreResult::failed(EvalError::Structural(reason));
    }

    if ctx.check_furiten && ctx.win_type == WinType::Ron && is_furiten(tiles, &ctx.discards) {
        return ScoreResult::failed(EvalError::Furiten);
    }

    let yr = eval_yaku(tiles, ctx);

    // 役なしは和了不可
    if yr.yaku.is_empty() {
        return ScoreResult::failed(EvalError::NoYaku);
    }

    ScoreResult {
        yaku: yr.yaku,
        han: yr.han,
        fu: yr.fu,
        is_error: false,
        is_furiten: false,
        error: None,
        message: None,
    }
}

/// Coarse furiten: any hand tile that also appears among the discards.
/// Waits are not computed.
fn is_furiten(tiles: &[Tile], discards: &[Tile]) -> bool {
    tiles.iter().any(|t| discards.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InvalidReason, Yaku};

    fn tiles(codes: &[&str]) -> Vec<Tile> {
        codes.iter().map(|c| Tile::from_code(c).unwrap()).collect()
    }

    fn riichi_hand() -> Vec<Tile> {
        tiles(&[
            "1m", "2m", "3m", "7m", "8m", "9m", "1p", "2p", "3p", "E", "E", "E", "9s", "9s",
        ])
    }

    #[test]
    fn structural_failure_is_data() {
        let h = tiles(&[
            "1m", "4m", "7m", "1p", "4p", "7p", "1s", "4s", "7s", "E", "S", "W", "N", "N",
        ]);
        let r = evaluate(&h, &WinContext::new(WinType::Ron, SeatRole::Dealer));
        assert!(r.is_error);
        assert_eq!(r.han, 0);
        assert_eq!(
            r.error,
            Some(EvalError::Structural(InvalidReason::NoValidPartition))
        );
        assert!(r.message.is_some());
    }

    #[test]
    fn furiten_only_applies_to_ron_with_check_enabled() {
        let h = riichi_hand();
        let mut ctx = WinContext::new(WinType::Ron, SeatRole::NonDealer);
        ctx.conditions.riichi = true;
        ctx.discards = tiles(&["2p"]);

        let r = evaluate(&h, &ctx);
        assert!(!r.is_error, "furiten check is off");

        ctx.check_furiten = true;
        let r = evaluate(&h, &ctx);
        assert!(r.is_error);
        assert!(r.is_furiten);
        assert_eq!(r.han, 0);

        ctx.win_type = WinType::Tsumo;
        let r = evaluate(&h, &ctx);
        assert!(!r.is_error);
        assert!(r.has(Yaku::Riichi));
    }

    #[test]
    fn furiten_ignores_tiles_not_in_hand() {
        let mut ctx = WinContext::new(WinType::Ron, SeatRole::NonDealer);
        ctx.conditions.riichi = true;
        ctx.check_furiten = true;
        ctx.discards = tiles(&["5s", "N"]);
        assert!(!evaluate(&riichi_hand(), &ctx).is_error);
    }

    #[test]
    fn valid_hand_without_yaku_is_rejected() {
        let r = evaluate(
            &riichi_hand(),
            &WinContext::new(WinType::Ron, SeatRole::NonDealer),
        );
        assert_eq!(r.error, Some(EvalError::NoYaku));
        assert!(r.yaku.is_empty());
        assert_eq!(r.han, 0);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let h = riichi_hand();
        let mut ctx = WinContext::new(WinType::Tsumo, SeatRole::Dealer);
        ctx.conditions.riichi = true;
        assert_eq!(evaluate(&h, &ctx), evaluate(&h, &ctx));
    }
}
