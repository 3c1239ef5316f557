//! Transposition table: fixed bucket count, four ways per bucket, keyed by
//! Zobrist hash modulo bucket count.

use crate::constants::{EVAL_MAX, EVAL_MIN, TT_BUCKETS, TT_WAYS};
use crate::moves::types::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Upper,
    Lower,
    Exact,
}

#[derive(Clone, Copy)]
pub struct TTEntry {
    pub key: u64,
    pub depth: i32,
    pub value: i32,
    pub best_move: Option<Move>,
    pub generation: u8,
    pub bound: Bound,
}

impl TTEntry {
    fn empty() -> Self {
        TTEntry {
            key: 0,
            depth: -1,
            value: 0,
            best_move: None,
            generation: 0,
            bound: Bound::Exact,
        }
    }

    fn is_empty(&self) -> bool {
        self.key == 0
    }
}

/// Mate scores are stored relative to the mated node, not the root; shift
/// them in and out of the table by the current ply.
pub fn adjust_for_table(value: i32, ply: i32) -> i32 {
    if value > EVAL_MAX {
        value + ply
    } else if value < EVAL_MIN {
        value - ply
    } else {
        value
    }
}

pub fn adjust_for_search(value: i32, ply: i32) -> i32 {
    if value > EVAL_MAX {
        value - ply
    } else if value < EVAL_MIN {
        value + ply
    } else {
        value
    }
}

fn usable(entry: &TTEntry, alpha: i32, beta: i32) -> bool {
    match entry.bound {
        Bound::Upper => entry.value <= alpha,
        Bound::Lower => entry.value >= beta,
        Bound::Exact => entry.value <= alpha || entry.value >= beta,
    }
}

pub struct TranspositionTable {
    buckets: Vec<[TTEntry; TT_WAYS]>,
    generation: u8,
}

impl TranspositionTable {
    pub fn new(bucket_count: usize) -> Self {
        TranspositionTable {
            buckets: vec![[TTEntry::empty(); TT_WAYS]; bucket_count.max(1)],
            generation: 0,
        }
    }

    pub fn with_default_size() -> Self {
        Self::new(TT_BUCKETS)
    }

    fn bucket_index(&self, key: u64) -> usize {
        (key as usize) % self.buckets.len()
    }

    pub fn new_search(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            *bucket = [TTEntry::empty(); TT_WAYS];
        }
        self.generation = 0;
    }

    /// Returns the first entry whose key matches and whose depth is at least
    /// `required_depth`, usable against `(alpha, beta)`. Bumps its
    /// generation on hit.
    pub fn probe(&mut self, key: u64, required_depth: i32, alpha: i32, beta: i32) -> Option<TTEntry> {
        let idx = self.bucket_index(key);
        let generation = self.generation;
        for entry in self.buckets[idx].iter_mut() {
            if entry.key == key && entry.depth >= required_depth {
                entry.generation = generation;
                if usable(entry, alpha, beta) {
                    return Some(*entry);
                }
            }
        }
        None
    }

    /// Best move recorded for `key`, regardless of whether its depth or
    /// bound would make it usable for the current window — used only as an
    /// ordering hint.
    pub fn best_move_hint(&self, key: u64) -> Option<Move> {
        let idx = self.bucket_index(key);
        self.buckets[idx]
            .iter()
            .find(|e| e.key == key && !e.is_empty())
            .and_then(|e| e.best_move)
    }

    pub fn store(&mut self, key: u64, depth: i32, value: i32, ply: i32, bound: Bound, best_move: Option<Move>) {
        let idx = self.bucket_index(key);
        let generation = self.generation;
        let stored_value = adjust_for_table(value, ply);

        if let Some(slot) = self.buckets[idx].iter_mut().find(|e| e.key == key) {
            let kept_move = best_move.or(slot.best_move);
            *slot = TTEntry {
                key,
                depth,
                value: stored_value,
                best_move: kept_move,
                generation,
                bound,
            };
            return;
        }

        let replace_idx = (0..TT_WAYS)
            .max_by_key(|&i| {
                let e = &self.buckets[idx][i];
                (generation.wrapping_sub(e.generation), -e.depth)
            })
            .unwrap_or(0);
        self.buckets[idx][replace_idx] = TTEntry {
            key,
            depth,
            value: stored_value,
            best_move,
            generation,
            bound,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::{square_of, Color, Piece, PieceType};

    fn sample_move() -> Move {
        Move::quiet(Piece::new(Color::White, PieceType::Pawn), square_of(5, 2), square_of(5, 4))
    }

    #[test]
    fn store_then_probe_round_trips() {
        let mut tt = TranspositionTable::new(16);
        tt.store(42, 5, 100, 0, Bound::Exact, Some(sample_move()));
        let entry = tt.probe(42, 5, -1000, 100).expect("exact entry at value >= beta is usable");
        assert_eq!(entry.value, 100);
        assert_eq!(entry.best_move, Some(sample_move()));
    }

    #[test]
    fn mate_score_adjusts_round_trip() {
        let raw = 29990;
        let table_value = adjust_for_table(raw, 3);
        assert_eq!(adjust_for_search(table_value, 3), raw);
    }

    #[test]
    fn preserves_best_move_when_store_omits_it() {
        let mut tt = TranspositionTable::new(16);
        tt.store(7, 3, 10, 0, Bound::Upper, Some(sample_move()));
        tt.store(7, 4, 20, 0, Bound::Upper, None);
        assert_eq!(tt.best_move_hint(7), Some(sample_move()));
    }

    /// With a full bucket, the stale-generation slot must be evicted, never
    /// one of the entries just stored this search. `Bound::Lower` entries are
    /// usable against any window with `beta` at or below the stored value, so
    /// probing with a low fixed `beta` isolates eviction from usability.
    #[test]
    fn replacement_evicts_the_oldest_generation_not_the_freshest() {
        let mut tt = TranspositionTable::new(1);

        // Generation 0: one entry that will go stale.
        tt.store(100, 2, 1, 0, Bound::Lower, None);

        // Advance to generation 1 and fill the remaining three ways.
        tt.new_search();
        tt.store(200, 2, 2, 0, Bound::Lower, None);
        tt.store(300, 2, 3, 0, Bound::Lower, None);
        tt.store(400, 2, 4, 0, Bound::Lower, None);

        // Bucket (size 1, so every key maps to it) is now full across two
        // generations. One more store must evict key 100, not one of the
        // three just-written current-generation entries.
        tt.store(500, 2, 5, 0, Bound::Lower, None);

        assert!(tt.probe(500, 2, -1000, 0).is_some(), "new entry must have been stored");
        assert!(tt.probe(200, 2, -1000, 0).is_some(), "current-generation entry must survive");
        assert!(tt.probe(300, 2, -1000, 0).is_some(), "current-generation entry must survive");
        assert!(tt.probe(400, 2, -1000, 0).is_some(), "current-generation entry must survive");
        assert!(tt.probe(100, 2, -1000, 0).is_none(), "stale-generation entry must have been evicted");
    }

    /// Among same-generation entries, the shallowest depth loses the tie.
    #[test]
    fn replacement_tiebreaks_same_generation_by_shallowest_depth() {
        let mut tt = TranspositionTable::new(1);
        tt.store(1, 8, 1, 0, Bound::Lower, None);
        tt.store(2, 2, 2, 0, Bound::Lower, None);
        tt.store(3, 6, 3, 0, Bound::Lower, None);
        tt.store(4, 4, 4, 0, Bound::Lower, None);

        tt.store(5, 10, 5, 0, Bound::Lower, None);

        assert!(tt.probe(2, 2, -1000, 0).is_none(), "shallowest same-generation entry must be evicted");
        assert!(tt.probe(1, 8, -1000, 0).is_some());
        assert!(tt.probe(3, 6, -1000, 0).is_some());
        assert!(tt.probe(4, 4, -1000, 0).is_some());
    }
}
