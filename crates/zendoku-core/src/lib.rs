//! Sudoku puzzle engine: board types, constraint checks, a randomized
//! puzzle generator, and a deterministic solver used for hints and
//! completion validation. The engine is pure in-memory state; everything
//! it randomizes flows through an explicit, seedable [`SimpleRng`].

use std::fmt;

pub mod generator;
pub mod rng;
pub mod solver;

pub use generator::{Difficulty, Generator};
pub use rng::SimpleRng;
pub use solver::{Hint, Solver};

/// A cell coordinate on the 9x9 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < 9 && col < 9);
        Self { row, col }
    }

    /// Index of the 3x3 box containing this position (0-8, row-major).
    pub fn box_index(&self) -> usize {
        (self.row / 3) * 3 + self.col / 3
    }

    /// All 81 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..81).map(|i| Position::new(i / 9, i % 9))
    }
}

/// A single cell: an optional digit 1-9, plus a flag marking it as part of
/// the original puzzle. Given cells are immutable through [`Grid::set`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    value: Option<u8>,
    given: bool,
}

impl Cell {
    /// Get the cell's value, if filled.
    pub fn value(&self) -> Option<u8> {
        self.value
    }

    /// Check if this cell is part of the original puzzle.
    pub fn is_given(&self) -> bool {
        self.given
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    pub fn is_filled(&self) -> bool {
        self.value.is_some()
    }
}

/// The 9x9 board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Cell; 9]; 9],
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    /// Create an all-empty grid.
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::default(); 9]; 9],
        }
    }

    /// Get a cell.
    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[pos.row][pos.col]
    }

    /// Get the value at a position, if filled.
    pub fn get(&self, pos: Position) -> Option<u8> {
        self.cells[pos.row][pos.col].value
    }

    /// Write a value (or `None` to clear) at a position. Given cells are
    /// refused and the grid is left unchanged; returns whether the write
    /// happened. No constraint check is performed here: whether a
    /// conflicting write is rejected or merely flagged is the caller's
    /// policy, via [`Grid::is_valid_placement`].
    pub fn set(&mut self, pos: Position, value: Option<u8>) -> bool {
        debug_assert!(value.map_or(true, |v| (1..=9).contains(&v)));
        let cell = &mut self.cells[pos.row][pos.col];
        if cell.given {
            return false;
        }
        cell.value = value;
        true
    }

    /// Place a puzzle digit and mark the cell as given.
    pub fn set_given(&mut self, pos: Position, value: u8) {
        debug_assert!((1..=9).contains(&value));
        self.cells[pos.row][pos.col] = Cell {
            value: Some(value),
            given: true,
        };
    }

    /// Number of given cells.
    pub fn given_count(&self) -> usize {
        Position::all().filter(|&p| self.cell(p).is_given()).count()
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        Position::all().filter(|&p| self.cell(p).is_empty()).count()
    }

    /// All empty positions, in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::all().filter(|&p| self.cell(p).is_empty()).collect()
    }

    /// True iff no other cell in `pos`'s row, column, or 3x3 box holds
    /// `value`. The target cell itself is excluded, so re-asserting a
    /// cell's current value is valid. Pure check, never mutates.
    #[allow(clippy::needless_range_loop)]
    pub fn is_valid_placement(&self, pos: Position, value: u8) -> bool {
        for col in 0..9 {
            if col != pos.col && self.cells[pos.row][col].value == Some(value) {
                return false;
            }
        }

        for row in 0..9 {
            if row != pos.row && self.cells[row][pos.col].value == Some(value) {
                return false;
            }
        }

        let box_row = (pos.row / 3) * 3;
        let box_col = (pos.col / 3) * 3;
        for row in box_row..box_row + 3 {
            for col in box_col..box_col + 3 {
                if (row != pos.row || col != pos.col)
                    && self.cells[row][col].value == Some(value)
                {
                    return false;
                }
            }
        }

        true
    }

    /// True when every filled cell is consistent with its row, column,
    /// and box. Empty cells are ignored.
    pub fn is_valid(&self) -> bool {
        Position::all().all(|pos| match self.get(pos) {
            Some(value) => self.is_valid_placement(pos, value),
            None => true,
        })
    }

    /// True when every cell is filled, valid or not.
    pub fn is_complete(&self) -> bool {
        Position::all().all(|pos| self.cell(pos).is_filled())
    }

    /// Completion check: every cell filled and every row, column, and box
    /// free of duplicates.
    pub fn is_solved(&self) -> bool {
        self.is_complete() && self.is_valid()
    }

    /// Parse a grid from an 81-character string in row-major order.
    /// Digits 1-9 become given cells; `0` and `.` are empty. Returns
    /// `None` for any other length or character.
    pub fn from_string(s: &str) -> Option<Grid> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 81 {
            return None;
        }

        let mut grid = Grid::empty();
        for (i, &c) in chars.iter().enumerate() {
            let pos = Position::new(i / 9, i % 9);
            match c {
                '0' | '.' => {}
                '1'..='9' => grid.set_given(pos, c as u8 - b'0'),
                _ => return None,
            }
        }
        Some(grid)
    }

    /// Serialize to the 81-character form, `0` for empty cells.
    pub fn to_string_compact(&self) -> String {
        Position::all()
            .map(|pos| match self.get(pos) {
                Some(v) => (b'0' + v) as char,
                None => '0',
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..9 {
            if row % 3 == 0 {
                writeln!(f, "+-------+-------+-------+")?;
            }
            for col in 0..9 {
                if col % 3 == 0 {
                    write!(f, "| ")?;
                }
                match self.cells[row][col].value {
                    Some(v) => write!(f, "{} ", v)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "|")?;
        }
        write!(f, "+-------+-------+-------+")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-formed puzzle and its unique solution, used as fixtures.
    const PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn test_box_index() {
        assert_eq!(Position::new(0, 0).box_index(), 0);
        assert_eq!(Position::new(2, 5).box_index(), 1);
        assert_eq!(Position::new(4, 4).box_index(), 4);
        assert_eq!(Position::new(8, 8).box_index(), 8);
        assert_eq!(Position::new(6, 2).box_index(), 6);
    }

    #[test]
    fn test_all_positions() {
        let positions: Vec<Position> = Position::all().collect();
        assert_eq!(positions.len(), 81);
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[80], Position::new(8, 8));
    }

    #[test]
    fn test_set_and_clear() {
        let mut grid = Grid::empty();
        let pos = Position::new(3, 4);

        assert!(grid.set(pos, Some(7)));
        assert_eq!(grid.get(pos), Some(7));

        assert!(grid.set(pos, None));
        assert_eq!(grid.get(pos), None);
    }

    #[test]
    fn test_given_cells_are_immutable() {
        let mut grid = Grid::empty();
        let pos = Position::new(0, 0);
        grid.set_given(pos, 5);

        assert!(!grid.set(pos, Some(3)));
        assert!(!grid.set(pos, None));
        assert_eq!(grid.get(pos), Some(5));
        assert!(grid.cell(pos).is_given());
    }

    #[test]
    fn test_placement_rejects_row_duplicate() {
        // Row 0 holds 1-9; placing 5 anywhere else in that row must fail.
        let mut grid = Grid::empty();
        for col in 0..9 {
            grid.set(Position::new(0, col), Some(col as u8 + 1));
        }

        assert!(!grid.is_valid_placement(Position::new(0, 3), 5));
    }

    #[test]
    fn test_placement_rejects_column_and_box_duplicates() {
        let mut grid = Grid::empty();
        grid.set(Position::new(2, 7), Some(4));

        // Same column.
        assert!(!grid.is_valid_placement(Position::new(8, 7), 4));
        // Same box.
        assert!(!grid.is_valid_placement(Position::new(0, 6), 4));
        // Unrelated cell.
        assert!(grid.is_valid_placement(Position::new(4, 0), 4));
    }

    #[test]
    fn test_placement_excludes_target_cell() {
        let mut grid = Grid::empty();
        let pos = Position::new(5, 5);
        grid.set(pos, Some(9));

        // Re-asserting the cell's own value conflicts with nothing else.
        assert!(grid.is_valid_placement(pos, 9));
    }

    #[test]
    fn test_placement_is_pure() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        let snapshot = grid.clone();

        grid.is_valid_placement(Position::new(0, 2), 4);
        grid.is_valid_placement(Position::new(0, 2), 5);

        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_completion_of_valid_solution() {
        let grid = Grid::from_string(SOLUTION).unwrap();
        assert!(grid.is_complete());
        assert!(grid.is_valid());
        assert!(grid.is_solved());
    }

    #[test]
    fn test_completion_rejects_empty_cell() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        assert!(grid.is_valid());
        assert!(!grid.is_complete());
        assert!(!grid.is_solved());
    }

    #[test]
    fn test_completion_rejects_box_duplicate() {
        // Corrupt the solution so the top-left box holds two 7s while
        // staying fully filled.
        let mut s: Vec<char> = SOLUTION.chars().collect();
        assert_eq!(s[9 + 2], '2');
        s[9 + 2] = '7';
        let corrupted: String = s.into_iter().collect();

        let grid = Grid::from_string(&corrupted).unwrap();
        assert!(grid.is_complete());
        assert!(!grid.is_solved());
    }

    #[test]
    fn test_from_string_round_trip() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        assert_eq!(grid.to_string_compact(), PUZZLE);
        assert_eq!(grid.given_count(), 30);
        assert_eq!(grid.empty_count(), 51);
    }

    #[test]
    fn test_from_string_rejects_malformed_input() {
        assert!(Grid::from_string("123").is_none());
        assert!(Grid::from_string(&"x".repeat(81)).is_none());

        let dotted = PUZZLE.replace('0', ".");
        assert!(Grid::from_string(&dotted).is_some());
    }
}
