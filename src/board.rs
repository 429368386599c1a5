use std::fmt;

use crate::config::{DEFAULT_BOARD_SIZE, validate_board_size};
use crate::error::EngineError;
use crate::types::{Cell, Coord, Direction, PlayerColor};

/// Immutable N x N board snapshot, stored row-major.
///
/// Every rule operation reads `&self`; `apply_move` hands back a new board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates the starting position for a board of side `size`.
    ///
    /// With `h = size / 2`: (h-1, h-1) and (h, h) are light,
    /// (h-1, h) and (h, h-1) are dark.
    pub fn new(size: usize) -> Result<Self, EngineError> {
        validate_board_size(size)?;
        Ok(Self::seeded(size))
    }

    /// The standard 8x8 starting position.
    pub fn standard() -> Self {
        Self::seeded(DEFAULT_BOARD_SIZE)
    }

    fn seeded(size: usize) -> Self {
        let mut cells = vec![Cell::Empty; size * size];
        let h = size / 2;
        cells[(h - 1) * size + (h - 1)] = Cell::Light;
        cells[h * size + h] = Cell::Light;
        cells[(h - 1) * size + h] = Cell::Dark;
        cells[h * size + (h - 1)] = Cell::Dark;
        Self { size, cells }
    }

    /// Parses a diagram with one string per row: `.` empty, `D` dark,
    /// `L` light. Whitespace inside a row is ignored.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, EngineError> {
        let size = rows.len();
        validate_board_size(size)?;

        let mut cells = Vec::with_capacity(size * size);
        for (row_idx, row) in rows.iter().enumerate() {
            let before = cells.len();
            for glyph in row.as_ref().chars().filter(|c| !c.is_whitespace()) {
                let cell = Cell::from_glyph(glyph).ok_or_else(|| {
                    EngineError::InvalidBoardConfiguration(format!(
                        "unknown cell '{glyph}' in row {row_idx}"
                    ))
                })?;
                cells.push(cell);
            }
            let width = cells.len() - before;
            if width != size {
                return Err(EngineError::InvalidBoardConfiguration(format!(
                    "row {row_idx} has {width} cells, expected {size}"
                )));
            }
        }

        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at `coord`.
    pub fn get(&self, coord: Coord) -> Result<Cell, EngineError> {
        self.check_bounds(coord)?;
        Ok(self.cell(coord))
    }

    /// Rows top to bottom, for rendering.
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.size).map(<[Cell]>::to_vec).collect()
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.size * self.size).map(|idx| Coord::new(idx / self.size, idx % self.size))
    }

    pub fn count(&self, color: PlayerColor) -> usize {
        let wanted = Cell::from(color);
        self.cells.iter().filter(|&&cell| cell == wanted).count()
    }

    /// Returns `(dark_count, light_count)`.
    pub fn counts(&self) -> (usize, usize) {
        (self.count(PlayerColor::Dark), self.count(PlayerColor::Light))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.occupied_count()
    }

    /// Returns the opponent stones that flip if `color` plays at `coord`.
    ///
    /// Each direction is walked until it hits an empty square, the edge or a
    /// stone of `color`. Only a run of opponent stones closed by a `color`
    /// anchor counts. An occupied `coord` captures nothing.
    pub fn captures_for_move(
        &self,
        coord: Coord,
        color: PlayerColor,
    ) -> Result<Vec<Coord>, EngineError> {
        self.check_bounds(coord)?;
        if !self.cell(coord).is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.collect_captures(coord, color))
    }

    pub fn is_move_legal(&self, coord: Coord, color: PlayerColor) -> Result<bool, EngineError> {
        Ok(!self.captures_for_move(coord, color)?.is_empty())
    }

    /// Places a `color` stone at `coord` and flips the captured run(s).
    /// The receiver is left untouched.
    pub fn apply_move(&self, coord: Coord, color: PlayerColor) -> Result<Board, EngineError> {
        self.place(coord, color).map(|(next, _)| next)
    }

    /// Like `apply_move`, but also returns the flipped stones.
    pub(crate) fn place(
        &self,
        coord: Coord,
        color: PlayerColor,
    ) -> Result<(Board, Vec<Coord>), EngineError> {
        let captures = self.captures_for_move(coord, color)?;
        if captures.is_empty() {
            return Err(EngineError::IllegalMove { coord, color });
        }

        let mut next = self.clone();
        let stone = Cell::from(color);
        for &target in std::iter::once(&coord).chain(&captures) {
            let idx = next.index(target);
            next.cells[idx] = stone;
        }
        Ok((next, captures))
    }

    /// Legal moves for `color`, row-major.
    pub fn legal_moves(&self, color: PlayerColor) -> Vec<Coord> {
        self.coords()
            .filter(|&coord| self.is_open_capture(coord, color))
            .collect()
    }

    pub fn player_has_legal_move(&self, color: PlayerColor) -> bool {
        self.coords().any(|coord| self.is_open_capture(coord, color))
    }

    /// The same position with every stone recolored.
    pub fn swap_colors(&self) -> Board {
        let cells = self
            .cells
            .iter()
            .map(|&cell| match cell.color() {
                Some(color) => Cell::from(color.opponent()),
                None => Cell::Empty,
            })
            .collect();
        Board {
            size: self.size,
            cells,
        }
    }

    fn is_open_capture(&self, coord: Coord, color: PlayerColor) -> bool {
        self.cell(coord).is_empty() && !self.collect_captures(coord, color).is_empty()
    }

    fn collect_captures(&self, origin: Coord, color: PlayerColor) -> Vec<Coord> {
        let mine = Cell::from(color);
        let theirs = Cell::from(color.opponent());
        let mut captures = Vec::new();

        for direction in Direction::ALL {
            let mut run = Vec::new();
            let mut cursor = origin.step(direction, self.size);

            while let Some(pos) = cursor {
                let cell = self.cell(pos);
                if cell == theirs {
                    run.push(pos);
                } else {
                    if cell == mine {
                        captures.append(&mut run);
                    }
                    break;
                }
                cursor = pos.step(direction, self.size);
            }
        }

        captures
    }

    fn check_bounds(&self, coord: Coord) -> Result<(), EngineError> {
        if coord.row >= self.size || coord.col >= self.size {
            return Err(EngineError::OutOfBounds {
                coord,
                size: self.size,
            });
        }
        Ok(())
    }

    fn index(&self, coord: Coord) -> usize {
        coord.row * self.size + coord.col
    }

    fn cell(&self, coord: Coord) -> Cell {
        self.cells[self.index(coord)]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_idx, row) in self.cells.chunks(self.size).enumerate() {
            if row_idx > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
        }
        Ok(())
    }
}
