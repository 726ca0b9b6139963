use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use web_time::{SystemTime, UNIX_EPOCH};

use crate::ai::MoveSelector;
use crate::board::Board;
use crate::config::GameConfig;
use crate::types::{Move, Side};

/// Baseline opponent: uniform choice among captures when any exist,
/// otherwise uniform among quiet moves.
#[derive(Debug, Clone)]
pub struct RandomMoveSelector {
    rng: StdRng,
}

impl RandomMoveSelector {
    /// Seeds from the wall clock.
    pub fn new() -> Self {
        Self::seeded(clock_seed())
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        match config.ai_seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }
}

impl Default for RandomMoveSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for RandomMoveSelector {
    fn select_move(&mut self, _board: &Board, _side: Side, moves: &[Move]) -> Option<Move> {
        let captures: Vec<&Move> = moves.iter().filter(|mv| mv.is_capture).collect();
        let pool: Vec<&Move> = if captures.is_empty() {
            moves.iter().collect()
        } else {
            captures
        };

        if pool.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range(0..pool.len());
        Some(*pool[idx])
    }
}

// `web-time` falls back to `Date.now()` on wasm32, where std's clock panics.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
