use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::PlayerColor;

pub const DEFAULT_BOARD_SIZE: usize = 8;
/// Smallest board that fits the 2x2 starting block with room to move.
pub const MIN_BOARD_SIZE: usize = 4;
/// Largest board a page may ask for.
pub const MAX_BOARD_SIZE: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub board_size: usize,
    pub first_player: PlayerColor,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            first_player: PlayerColor::Dark,
        }
    }
}

impl EngineConfig {
    pub fn with_board_size(board_size: usize) -> Self {
        Self {
            board_size,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        validate_board_size(self.board_size)?;
        if self.board_size > MAX_BOARD_SIZE {
            return Err(EngineError::InvalidBoardConfiguration(format!(
                "board size must be at most {MAX_BOARD_SIZE}, got {}",
                self.board_size
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_board_size(size: usize) -> Result<(), EngineError> {
    if size % 2 != 0 {
        return Err(EngineError::InvalidBoardConfiguration(format!(
            "board size must be even, got {size}"
        )));
    }
    if size < MIN_BOARD_SIZE {
        return Err(EngineError::InvalidBoardConfiguration(format!(
            "board size must be at least {MIN_BOARD_SIZE}, got {size}"
        )));
    }
    Ok(())
}
