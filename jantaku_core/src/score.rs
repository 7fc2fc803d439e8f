use crate::engine::{evaluate, WinContext};
use crate::errors::{HandError, RequestError};
use crate::hand::HAND_SIZE;
use crate::points::{limit_hand, payment_breakdown, to_points};
use crate::tile::{parse_tiles, sort_tiles};
use crate::{ScoreReport, ScoreRequest};

/// Parses a request, evaluates it and, unless evaluation failed, prices it.
pub fn score(req: &ScoreRequest) -> Result<ScoreReport, RequestError> {
    let mut tiles = parse_tiles(&req.tiles)?;
    if tiles.len() != HAND_SIZE {
        return Err(HandError::WrongTileCount(tiles.len()).into());
    }
    sort_tiles(&mut tiles);

    let ctx = WinContext {
        win_type: req.win_type,
        role: req.role,
        closed: req.closed,
        discards: parse_tiles(&req.discards)?,
        check_furiten: req.check_furiten,
        conditions: req.conditions,
    };

    let result = evaluate(&tiles, &ctx);
    if result.is_error {
        tracing::debug!(error = ?result.error, "hand rejected");
        return Ok(ScoreReport {
            result,
            payment: None,
            limit: None,
            breakdown: None,
        });
    }

    let payment = to_points(result.han, result.fu, req.role.is_dealer(), req.win_type);
    tracing::debug!(han = result.han, fu = result.fu, ?payment, "hand scored");

    Ok(ScoreReport {
        limit: limit_hand(result.han),
        breakdown: Some(payment_breakdown(payment, u32::from(req.player_count))),
        payment: Some(payment),
        result,
    })
}
