//! Iterative deepening driver, alpha-beta with pruning, and quiescence.

use crate::constants::{MATE, PLY_MAX, VALUE_MAX, VALUE_MIN};
use crate::moves::execute::{self, last_move_was_null, make_move, make_null, undo_move, undo_null};
use crate::moves::movegen::generate_pseudo_legal;
use crate::moves::square_control::{in_check, move_made_legal};
use crate::moves::types::{Move, MoveList};
use crate::square::to8x8;
use tracing::{debug, info, trace};

use super::context::SearchContext;
use super::eval::static_eval;
use super::ordering::order_moves;
use super::tt::{adjust_for_search, Bound};

/// Runs iterative deepening up to `depth_limit` or `budget_ms`, whichever
/// comes first. Returns the best move found and the PV lines emitted along
/// the way.
pub fn iterative_deepening(ctx: &mut SearchContext, budget_ms: u64, depth_limit: i32) -> (Option<Move>, Vec<String>) {
    ctx.reset_for_search(budget_ms, depth_limit);

    let mut depth = 1;
    while depth <= depth_limit {
        ctx.current_iteration_depth = depth;
        let mut pv = Vec::new();
        let value = alpha_beta(ctx, VALUE_MIN, VALUE_MAX, 0, depth, &mut pv);

        if ctx.abort {
            debug!(depth, "iterative deepening aborted mid-depth");
            break;
        }
        info!(depth, value, nodes = ctx.nodes, elapsed_ms = ctx.elapsed_ms(), "completed depth");
        if ctx.elapsed_ms() as f64 > budget_ms as f64 * 0.6 {
            break;
        }
        depth += 1;
    }

    (ctx.root_best_move, std::mem::take(&mut ctx.info_lines))
}

fn format_info_line(depth: i32, value: i32, ctx: &SearchContext, pv: &[Move]) -> String {
    let elapsed = ctx.start.elapsed().as_secs_f64();
    let moves: Vec<String> = pv.iter().map(|m| m.to_uci()).collect();
    format!("{} {} {:.4} {} {}", depth, value, elapsed, ctx.nodes, moves.join(" "))
}

/// Alpha-beta search. Returns a value in `[VALUE_MIN, VALUE_MAX]` from the
/// perspective of the side to move at `ply`. Precondition: `beta > alpha`.
pub fn alpha_beta(ctx: &mut SearchContext, alpha: i32, beta: i32, ply: i32, depth: i32, pv_out: &mut Vec<Move>) -> i32 {
    debug_assert!(beta > alpha);

    if ctx.abort {
        return 0;
    }
    if ply > 0 && (ctx.board.is_fifty_move_draw() || ctx.board.is_threefold()) {
        return 0;
    }
    if depth <= 0 {
        return quiescence(ctx, alpha, beta, ply, pv_out);
    }

    ctx.bump_node();
    if ply > 0 {
        pv_out.clear();
    }
    if ply >= PLY_MAX as i32 - 1 {
        return static_eval(&ctx.board);
    }

    let key = ctx.board.zobrist;
    let hint = match ctx.tt.probe(key, depth, alpha, beta) {
        Some(entry) => return adjust_for_search(entry.value, ply),
        None => ctx.tt.best_move_hint(key),
    };

    let mover = ctx.board.side_to_move.expect("alpha_beta requires a side to move");
    let checked = in_check(&ctx.board, mover);
    let eval = static_eval(&ctx.board);

    // Razoring: a hopeless-looking quiet node drops straight to quiescence.
    if depth <= 3 && !checked && eval + 150 * depth < alpha {
        let razor_alpha = alpha - 150 * depth;
        let mut scratch = Vec::new();
        let val = quiescence(ctx, razor_alpha, razor_alpha + 1, ply, &mut scratch);
        if val <= razor_alpha {
            debug!(ply, depth, eval, alpha, "razoring cut");
            return val;
        }
    }

    // Null-move pruning: skip a turn and see if the opponent is still in
    // trouble even with a free move; if so this node is probably a cutoff.
    if depth > 3
        && !checked
        && alpha == beta - 1
        && eval >= beta
        && !last_move_was_null(&ctx.board)
        && ctx.board.has_material(mover)
    {
        make_null(&mut ctx.board);
        let mut null_pv = Vec::new();
        let score = -alpha_beta(ctx, -beta, -beta + 1, ply + 1, depth - 3, &mut null_pv);
        undo_null(&mut ctx.board);
        if ctx.abort {
            return 0;
        }
        if score >= beta {
            let clamped = if score.abs() >= MATE - PLY_MAX as i32 { beta } else { score };
            debug!(ply, depth, score, beta, "null-move cut");
            ctx.tt.store(key, depth, clamped, ply, Bound::Lower, None);
            return clamped;
        }
    }

    let new_depth = depth - 1 + if checked { 1 } else { 0 };

    let mut moves = MoveList::new();
    generate_pseudo_legal(&ctx.board, &mut moves);
    order_moves(&mut moves, hint, &ctx.history);

    let mut alpha = alpha;
    let mut best_value = VALUE_MIN;
    let mut best_move: Option<Move> = None;
    let mut move_count = 0;

    for mv in moves {
        make_move(&mut ctx.board, mv);
        if !move_made_legal(&ctx.board, &mv) {
            undo_move(&mut ctx.board);
            continue;
        }
        move_count += 1;

        let mut child_pv = Vec::new();
        let value = if move_count == 1 {
            -alpha_beta(ctx, -beta, -alpha, ply + 1, new_depth, &mut child_pv)
        } else {
            let zero_window = alpha == beta - 1;
            if !checked && new_depth == 1 && !mv.is_tactical() && zero_window && eval + 100 < alpha {
                undo_move(&mut ctx.board);
                continue;
            }
            let reduction = if !checked && new_depth > 1 && move_count > 4 && !mv.is_tactical() && zero_window && eval < alpha
            {
                1
            } else {
                0
            };

            let mut v = -alpha_beta(ctx, -alpha - 1, -alpha, ply + 1, new_depth - reduction, &mut child_pv);
            if !ctx.abort && v > alpha && reduction > 0 {
                trace!(ply, move_count, reduction, v, alpha, "LMR re-search at full depth");
                v = -alpha_beta(ctx, -alpha - 1, -alpha, ply + 1, new_depth, &mut child_pv);
            }
            if !ctx.abort && alpha < v && v < beta {
                v = -alpha_beta(ctx, -beta, -alpha, ply + 1, new_depth, &mut child_pv);
            }
            v
        };

        undo_move(&mut ctx.board);
        if ctx.abort {
            return 0;
        }

        if value >= beta {
            if !mv.is_tactical() {
                ctx.history.update(mv.piece, to8x8(mv.to), depth);
            }
            ctx.tt.store(key, depth, value, ply, Bound::Lower, Some(mv));
            return value;
        }

        if value > best_value {
            best_value = value;
            if value > alpha {
                alpha = value;
                best_move = Some(mv);
                *pv_out = Vec::with_capacity(1 + child_pv.len());
                pv_out.push(mv);
                pv_out.extend(child_pv.iter().copied());
                if ply == 0 {
                    ctx.root_best_move = Some(mv);
                    let line = format_info_line(depth, value, ctx, pv_out);
                    ctx.info_lines.push(line);
                }
            }
        }
    }

    if move_count == 0 {
        return if checked { -MATE + ply } else { 0 };
    }

    match best_move {
        Some(mv) => ctx.tt.store(key, depth, best_value, ply, Bound::Exact, Some(mv)),
        None => ctx.tt.store(key, depth, best_value, ply, Bound::Upper, None),
    }
    best_value
}

/// Quiescence: extends only captures and promotions until the position is
/// tactically quiet. No TT probing, no check extension, no pruning.
pub fn quiescence(ctx: &mut SearchContext, alpha: i32, beta: i32, ply: i32, pv_out: &mut Vec<Move>) -> i32 {
    if ctx.abort {
        return 0;
    }
    ctx.bump_node();
    if ply > 0 {
        pv_out.clear();
    }
    if ply >= PLY_MAX as i32 - 1 {
        return static_eval(&ctx.board);
    }

    let mut alpha = alpha;
    let mut best = static_eval(&ctx.board);
    if best >= beta {
        return best;
    }
    if best > alpha {
        alpha = best;
    }

    let mut moves = MoveList::new();
    execute::generate_captures(&ctx.board, &mut moves);
    order_moves(&mut moves, None, &ctx.history);

    for mv in moves {
        make_move(&mut ctx.board, mv);
        if !move_made_legal(&ctx.board, &mv) {
            undo_move(&mut ctx.board);
            continue;
        }
        let mut child_pv = Vec::new();
        let value = -quiescence(ctx, -beta, -alpha, ply + 1, &mut child_pv);
        undo_move(&mut ctx.board);
        if ctx.abort {
            return 0;
        }
        if value >= beta {
            return value;
        }
        if value > best {
            best = value;
            if value > alpha {
                alpha = value;
                *pv_out = Vec::with_capacity(1 + child_pv.len());
                pv_out.push(mv);
                pv_out.extend(child_pv.iter().copied());
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn context(fen: &str) -> SearchContext {
        SearchContext::new(Board::from_fen(fen).unwrap(), 997)
    }

    #[test]
    fn finds_mate_in_one() {
        // Black's king is boxed in by its own pawns; Ra1-a8 is back-rank mate.
        let mut ctx = context("6k1/5ppp/8/8/8/8/8/R6K w - - 0 1");
        let (best, _) = iterative_deepening(&mut ctx, 2_000, 3);
        let mv = best.expect("mate in one should be found");
        assert_eq!(mv.from, crate::square::square_of(1, 1));
        assert_eq!(mv.to, crate::square::square_of(1, 8));
    }

    #[test]
    fn startpos_search_returns_legal_move() {
        let mut ctx = context(crate::board::fen::STARTPOS_FEN);
        let (best, info) = iterative_deepening(&mut ctx, 2_000, 3);
        assert!(best.is_some());
        assert!(!info.is_empty());
    }

    #[test]
    fn quiescence_resolves_hanging_capture() {
        let mut ctx = context("4k3/8/8/8/3q4/8/3R4/4K3 w - - 0 1");
        let mut pv = Vec::new();
        let value = quiescence(&mut ctx, VALUE_MIN, VALUE_MAX, 0, &mut pv);
        assert!(value > 0, "white should find Rxd4 and come out ahead");
    }
}
