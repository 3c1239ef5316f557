//! The collaborator-facing API: the one surface a wire-protocol adapter
//! (or anything else embedding the core) calls into. Everything below this
//! module is an implementation detail of the engine.

use crate::board::fen::parse_algebraic;
use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::moves::execute::{generate_legal, make_move, undo_move};
use crate::moves::types::{Move, MoveList};
use crate::search::context::SearchContext;
use crate::search::search::iterative_deepening;
use crate::square::PieceType;

pub struct Engine {
    pub ctx: SearchContext,
    move_time_ms: u64,
    depth_limit: i32,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Engine {
            ctx: SearchContext::new(Board::starting_position(), config.tt_buckets),
            move_time_ms: config.default_move_time_ms,
            depth_limit: config.default_depth_limit,
        }
    }

    /// Resets the board, castling rights, counters and search tables for a
    /// fresh game starting from `fen`.
    pub fn new_game(&mut self, fen: &str) -> EngineResult<()> {
        self.ctx.board = Board::from_fen(fen)?;
        self.ctx.tt.clear();
        self.ctx.history.clear();
        Ok(())
    }

    pub fn set_position(&mut self, fen: &str) -> EngineResult<()> {
        self.ctx.board = Board::from_fen(fen)?;
        Ok(())
    }

    pub fn apply_move(&mut self, text: &str) -> EngineResult<()> {
        let mv = self.resolve_move(text)?;
        make_move(&mut self.ctx.board, mv);
        Ok(())
    }

    pub fn undo_last(&mut self) -> EngineResult<()> {
        if self.ctx.board.history_index == 0 {
            return Err(EngineError::HistoryUnderflow);
        }
        undo_move(&mut self.ctx.board);
        Ok(())
    }

    /// Runs iterative deepening with the engine's current time/depth
    /// settings and returns the chosen move's long-algebraic text plus any
    /// PV lines emitted along the way.
    pub fn search(&mut self) -> (String, Vec<String>) {
        let (best, info) = iterative_deepening(&mut self.ctx, self.move_time_ms, self.depth_limit);
        let text = best.map(|mv| mv.to_uci()).unwrap_or_default();
        (text, info)
    }

    pub fn set_move_time_seconds(&mut self, seconds: u64) {
        self.move_time_ms = seconds * 1000;
    }

    pub fn set_depth_limit(&mut self, depth: i32) {
        self.depth_limit = depth;
    }

    /// `time N` reports remaining clock in centiseconds; derives a per-move
    /// budget as a third of a thirtieth of the remaining clock.
    pub fn set_remaining_time_centis(&mut self, centis: u64) {
        self.move_time_ms = centis * 10 / 30;
    }

    fn resolve_move(&mut self, text: &str) -> EngineResult<Move> {
        let text = text.trim();
        if text.len() < 4 {
            return Err(EngineError::MalformedMoveText(text.to_string()));
        }
        let from = parse_algebraic(&text[0..2])
            .ok_or_else(|| EngineError::MalformedMoveText(text.to_string()))?;
        let to = parse_algebraic(&text[2..4])
            .ok_or_else(|| EngineError::MalformedMoveText(text.to_string()))?;
        let promotion = match text.chars().nth(4) {
            Some('q') => Some(PieceType::Queen),
            Some('r') => Some(PieceType::Rook),
            Some('b') => Some(PieceType::Bishop),
            Some('n') => Some(PieceType::Knight),
            Some(_) => return Err(EngineError::MalformedMoveText(text.to_string())),
            None => None,
        };

        let mut legal = MoveList::new();
        generate_legal(&mut self.ctx.board, &mut legal);
        legal
            .into_iter()
            .find(|mv| mv.from == from && mv.to == to && mv.promotion == promotion)
            .ok_or_else(|| EngineError::IllegalMove(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_move_then_undo_restores_position() {
        let mut engine = Engine::new(EngineConfig::default());
        let before = engine.ctx.board.to_fen();
        engine.apply_move("e2e4").unwrap();
        assert_ne!(engine.ctx.board.to_fen(), before);
        engine.undo_last().unwrap();
        assert_eq!(engine.ctx.board.to_fen(), before);
    }

    #[test]
    fn rejects_illegal_move_text() {
        let mut engine = Engine::new(EngineConfig::default());
        assert!(engine.apply_move("e2e5").is_err());
    }

    #[test]
    fn search_returns_a_legal_opening_move() {
        let mut engine = Engine::new(EngineConfig::default());
        engine.set_move_time_seconds(1);
        engine.set_depth_limit(2);
        let (best, _) = engine.search();
        assert!(!best.is_empty());
    }
}
