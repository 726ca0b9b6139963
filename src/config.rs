//! Options accepted when a game is created.

use serde::Deserialize;

/// Game options. Every field has a default, so an empty object (or no
/// object at all) yields a standard game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the built-in random move chooser. `None` seeds from the clock.
    pub ai_seed: Option<u64>,
}

impl GameConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            ai_seed: Some(seed),
        }
    }
}
