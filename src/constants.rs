//! Engine-wide numeric constants. Kept in one place so search, board and the
//! transposition table agree on the same bounds.

pub const PLY_MAX: usize = 128;
pub const DEPTH_MAX: i32 = 64;
pub const VALUE_MIN: i32 = -32767;
pub const VALUE_MAX: i32 = 32767;
pub const MATE: i32 = 30000;
pub const EVAL_MIN: i32 = -10000;
pub const EVAL_MAX: i32 = 10000;
pub const HISTORY_MAX: usize = 1024;
pub const TT_BUCKETS: usize = 500_000;
pub const TT_WAYS: usize = 4;
