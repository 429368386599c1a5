use std::fmt;

use serde::{Deserialize, Serialize};

/// Contents of one board square.
///
/// Serialises as the front end's token class names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    #[serde(rename = "none")]
    Empty,
    Dark,
    Light,
}

impl Cell {
    /// Returns the stone color, or `None` for an empty square.
    pub fn color(self) -> Option<PlayerColor> {
        match self {
            Cell::Empty => None,
            Cell::Dark => Some(PlayerColor::Dark),
            Cell::Light => Some(PlayerColor::Light),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub(crate) fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Dark => 'D',
            Cell::Light => 'L',
        }
    }

    pub(crate) fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Cell::Empty),
            'D' => Some(Cell::Dark),
            'L' => Some(Cell::Light),
            _ => None,
        }
    }
}

impl From<PlayerColor> for Cell {
    fn from(color: PlayerColor) -> Self {
        match color {
            PlayerColor::Dark => Cell::Dark,
            PlayerColor::Light => Cell::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    Dark,
    Light,
}

impl PlayerColor {
    pub fn opponent(self) -> Self {
        match self {
            PlayerColor::Dark => PlayerColor::Light,
            PlayerColor::Light => PlayerColor::Dark,
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerColor::Dark => f.write_str("dark"),
            PlayerColor::Light => f.write_str("light"),
        }
    }
}

/// A board coordinate, `[row][col]` from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Moves one step in `direction`, or `None` when that leaves a board of
    /// side `size`.
    pub fn step(self, direction: Direction, size: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(direction.d_row)?;
        let col = self.col.checked_add_signed(direction.d_col)?;
        (row < size && col < size).then_some(Self { row, col })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A unit step on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub d_row: isize,
    pub d_col: isize,
}

impl Direction {
    const fn new(d_row: isize, d_col: isize) -> Self {
        Self { d_row, d_col }
    }

    /// The Moore neighbourhood without its centre.
    pub const ALL: [Direction; 8] = [
        Direction::new(-1, -1),
        Direction::new(-1, 0),
        Direction::new(-1, 1),
        Direction::new(0, -1),
        Direction::new(0, 1),
        Direction::new(1, -1),
        Direction::new(1, 0),
        Direction::new(1, 1),
    ];
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "player", rename_all = "camelCase")]
pub enum Outcome {
    Winner(PlayerColor),
    Draw,
}

impl Outcome {
    /// Majority of stones wins; equal counts draw.
    pub fn from_counts(dark: usize, light: usize) -> Self {
        match dark.cmp(&light) {
            std::cmp::Ordering::Greater => Outcome::Winner(PlayerColor::Dark),
            std::cmp::Ordering::Less => Outcome::Winner(PlayerColor::Light),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn winner(self) -> Option<PlayerColor> {
        match self {
            Outcome::Winner(color) => Some(color),
            Outcome::Draw => None,
        }
    }
}

/// What happens to the turn after a move has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum TurnResult {
    /// The opponent can move and takes the turn.
    NextPlayer(PlayerColor),
    /// The named player has no move; the turn stays with the mover.
    Skipped(PlayerColor),
    /// Neither player can move.
    GameOver(Outcome),
}

/// Notifications for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum GameEvent {
    MoveMade(PlayerColor),
    TurnSkipped(PlayerColor),
    GameEnded(Outcome),
}

impl GameEvent {
    /// Text for the event banner above the board. A plain move clears it.
    pub fn banner(&self) -> Option<String> {
        match self {
            GameEvent::MoveMade(_) => None,
            GameEvent::TurnSkipped(skipped) => Some(format!(
                "No moves available for {skipped}! Turn reverts to {}",
                skipped.opponent()
            )),
            GameEvent::GameEnded(outcome) => Some(match outcome.winner() {
                Some(winner) => format!("Game over. {winner} has won!"),
                None => "A draw! Well played to you both".to_string(),
            }),
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: Vec<Vec<Cell>>,
    pub size: usize,
    /// `None` once the game has ended.
    pub active_player: Option<PlayerColor>,
    pub dark_count: usize,
    pub light_count: usize,
    pub is_game_over: bool,
    pub outcome: Option<Outcome>,
    /// Stones recolored by the previous move. Empty before the first move.
    pub flipped: Vec<Coord>,
    pub legal_moves: Vec<Coord>,
    pub message: Option<String>,
}

/// Everything a single accepted move produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReport {
    pub player: PlayerColor,
    pub placed: Coord,
    pub flipped: Vec<Coord>,
    pub turn: TurnResult,
    pub events: Vec<GameEvent>,
}
