use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod types;

use crate::config::GameConfig;
use crate::game::RulesEngine;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Browser-facing handle to one game, playing the built-in random
/// opponent on `ai_move`.
#[wasm_bindgen]
pub struct WasmGame {
    engine: RulesEngine,
}

#[wasm_bindgen]
impl WasmGame {
    /// Accepts `undefined`, `null`, or an object such as `{ ai_seed: 7 }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsError> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|err| JsError::new(&format!("invalid game config: {err}")))?
        };

        Ok(Self {
            engine: RulesEngine::with_config(&config),
        })
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn select_cell(&mut self, row: u8, col: u8) -> bool {
        self.engine.select_cell(row, col)
    }

    pub fn attempt_move(&mut self, row: u8, col: u8) -> Result<JsValue, JsError> {
        let report = self.engine.attempt_move(row, col)?;
        to_js(&report)
    }

    /// Returns the step report, or `undefined` when the click only changed
    /// the selection.
    pub fn click(&mut self, row: u8, col: u8) -> Result<JsValue, JsError> {
        let report = self.engine.click(row, col);
        to_js(&report)
    }

    pub fn ai_move(&mut self) -> Result<JsValue, JsError> {
        let report = self.engine.ai_move()?;
        to_js(&report)
    }

    /// 0 while the game continues, otherwise the winner's side code
    /// (1 = white, 2 = black).
    pub fn winner(&self) -> u8 {
        self.engine.winner().map_or(0, |side| side.code())
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.engine.to_game_state())
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()))
}
