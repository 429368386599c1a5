use wasm_bindgen::prelude::*;

use crate::config::EngineConfig;
use crate::game::Game;
use crate::types::Coord;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// A game session handle owned by the page.
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    /// `config` may be `undefined` for a standard 8x8 game.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WebGame, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            game: Game::new(&config)?,
        })
    }

    /// Plays the active player's stone. Returns the move report, or `null`
    /// when the click should be ignored.
    pub fn play(&mut self, row: u32, col: u32) -> Result<JsValue, JsError> {
        match self.game.play(coord(row, col)) {
            Ok(report) => Ok(serde_wasm_bindgen::to_value(&report)?),
            Err(err) if err.is_recoverable() => Ok(JsValue::NULL),
            Err(err) => Err(err.into()),
        }
    }

    #[wasm_bindgen(js_name = isMoveLegal)]
    pub fn is_move_legal(&self, row: u32, col: u32) -> Result<bool, JsError> {
        Ok(self.game.is_move_legal(coord(row, col))?)
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.game.to_game_state())?)
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.game.legal_moves())?)
    }

    #[wasm_bindgen(getter, js_name = isOver)]
    pub fn is_over(&self) -> bool {
        self.game.is_over()
    }
}

fn coord(row: u32, col: u32) -> Coord {
    Coord::new(row as usize, col as usize)
}

