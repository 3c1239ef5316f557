//! Owns the board and the long-lived search tables for one engine instance.
//! Reset between top-level search calls by the iterative deepening driver.

use std::time::Instant;

use crate::board::Board;
use crate::moves::types::Move;

use super::ordering::HistoryTable;
use super::tt::TranspositionTable;

pub struct SearchContext {
    pub board: Board,
    pub tt: TranspositionTable,
    pub history: HistoryTable,
    pub nodes: u64,
    pub abort: bool,
    pub start: Instant,
    pub budget_ms: u64,
    pub depth_limit: i32,
    pub current_iteration_depth: i32,
    pub root_best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

impl SearchContext {
    pub fn new(board: Board, tt_buckets: usize) -> Self {
        SearchContext {
            board,
            tt: TranspositionTable::new(tt_buckets),
            history: HistoryTable::new(),
            nodes: 0,
            abort: false,
            start: Instant::now(),
            budget_ms: 0,
            depth_limit: 0,
            current_iteration_depth: 0,
            root_best_move: None,
            info_lines: Vec::new(),
        }
    }

    /// Resets history, bumps the TT generation, and rearms the node counter,
    /// abort flag and wall clock for a fresh top-level search call.
    pub fn reset_for_search(&mut self, budget_ms: u64, depth_limit: i32) {
        self.history.clear();
        self.tt.new_search();
        self.nodes = 0;
        self.abort = false;
        self.start = Instant::now();
        self.budget_ms = budget_ms;
        self.depth_limit = depth_limit;
        self.current_iteration_depth = 0;
        self.root_best_move = None;
        self.info_lines.clear();
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Counts one visited node; every 2,000 visits, polls the clock and the
    /// depth limit and latches `abort` if either has been exceeded.
    pub fn bump_node(&mut self) {
        self.nodes += 1;
        if self.nodes % 2000 == 0
            && (self.elapsed_ms() >= self.budget_ms || self.current_iteration_depth >= self.depth_limit)
        {
            self.abort = true;
        }
    }
}
