//! Game-outcome classification, layered on top of `Board` and move
//! generation so board state itself stays outcome-agnostic.

use crate::board::Board;
use crate::moves::execute::generate_legal;
use crate::moves::square_control::in_check;
use crate::moves::types::MoveList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InPlay,
    Checkmate,
    Stalemate,
    DrawFiftyMove,
    DrawThreefold,
}

pub fn is_draw_by_threefold(board: &Board) -> bool {
    board.is_threefold()
}

pub fn is_draw_by_fifty_move(board: &Board) -> bool {
    board.is_fifty_move_draw()
}

/// Priority: threefold, then fifty-move, then checkmate/stalemate/in-play.
/// Mirrors FIDE's claim ordering but omits the automatic-draw and
/// dead-position rules this engine does not implement.
pub fn position_status(board: &mut Board) -> GameStatus {
    if board.is_threefold() {
        return GameStatus::DrawThreefold;
    }
    if board.is_fifty_move_draw() {
        return GameStatus::DrawFiftyMove;
    }

    let mut legal = MoveList::new();
    generate_legal(board, &mut legal);
    if legal.is_empty() {
        let mover = board.side_to_move.expect("position_status requires a side to move");
        if in_check(board, mover) {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    } else {
        GameStatus::InPlay
    }
}
