pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod types;
pub mod web;

pub use board::Board;
pub use config::EngineConfig;
pub use error::EngineError;
pub use game::{Game, GameStatus, advance_turn};
pub use types::{Cell, Coord, GameEvent, GameState, MoveReport, Outcome, PlayerColor, TurnResult};
