//! Runtime-tunable engine settings. Separate from `constants` because these
//! values can be changed by the wire protocol (`st`/`sd`/`time`) during a
//! session, where `constants` holds the fixed bounds the search algorithm
//! itself relies on.

use crate::constants::{DEPTH_MAX, TT_BUCKETS};

#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub tt_buckets: usize,
    pub default_move_time_ms: u64,
    pub default_depth_limit: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            tt_buckets: TT_BUCKETS,
            default_move_time_ms: 5_000,
            default_depth_limit: DEPTH_MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.tt_buckets, TT_BUCKETS);
        assert_eq!(config.default_depth_limit, DEPTH_MAX);
    }
}
