use thiserror::Error;

use crate::types::{Coord, PlayerColor};

/// Errors produced by the rule engine and the game session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A coordinate outside the board was passed in.
    #[error("position {coord} is outside the {size}x{size} board")]
    OutOfBounds { coord: Coord, size: usize },

    /// The square is occupied or the move captures nothing.
    #[error("illegal move for {color} at {coord}")]
    IllegalMove { coord: Coord, color: PlayerColor },

    #[error("invalid board configuration: {0}")]
    InvalidBoardConfiguration(String),

    #[error("game is already over")]
    GameAlreadyOver,
}

impl EngineError {
    /// True for rejections the UI can simply ignore.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::IllegalMove { .. } | EngineError::GameAlreadyOver
        )
    }
}
