use crate::rng::SimpleRng;
use crate::{Grid, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty level of a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// How many of the 81 solved cells are cleared to form the puzzle.
    pub fn cells_to_clear(&self) -> usize {
        match self {
            Difficulty::Easy => 40,
            Difficulty::Medium => 50,
            Difficulty::Hard => 60,
        }
    }

    /// Get all difficulty levels, easiest first.
    pub fn all_levels() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!(
                "unknown difficulty '{}' (expected easy, medium, or hard)",
                s
            )),
        }
    }
}

/// Sudoku puzzle generator.
///
/// Produces a fully solved board by a randomized iterative fill, then
/// derives a puzzle from it by clearing cells according to difficulty.
pub struct Generator {
    rng: SimpleRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a new generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SimpleRng::with_seed(seed),
        }
    }

    /// Generate a puzzle and the solved board it was carved from.
    pub fn generate(&mut self, difficulty: Difficulty) -> (Grid, Grid) {
        let solution = self.generate_solution();
        let puzzle = self.derive_puzzle(&solution, difficulty);
        (puzzle, solution)
    }

    /// Produce a complete, valid solution. Cells carry plain values, not
    /// given flags; which of them survive into a puzzle is decided by
    /// [`Generator::derive_puzzle`].
    pub fn generate_solution(&mut self) -> Grid {
        let mut grid = Grid::empty();
        self.fill(&mut grid);
        debug_assert!(grid.is_solved());
        grid
    }

    /// Derive a playable puzzle by clearing `difficulty.cells_to_clear()`
    /// randomly chosen cells from a solved board. Surviving cells become
    /// givens. The puzzle is not checked for solution uniqueness.
    pub fn derive_puzzle(&mut self, solution: &Grid, difficulty: Difficulty) -> Grid {
        debug_assert!(solution.is_solved());

        let mut positions: Vec<Position> = Position::all().collect();
        self.rng.shuffle(&mut positions);

        let mut puzzle = Grid::empty();
        for &pos in &positions[difficulty.cells_to_clear()..] {
            if let Some(value) = solution.get(pos) {
                puzzle.set_given(pos, value);
            }
        }
        puzzle
    }

    /// Fill the grid with a random complete solution. Iterative
    /// backtracking: a cursor walks the 81 cells in row-major order, each
    /// cell trying candidates from its own pre-shuffled digit order.
    fn fill(&mut self, grid: &mut Grid) {
        let cells: Vec<Position> = Position::all().collect();

        let mut orders: Vec<[u8; 9]> = Vec::with_capacity(cells.len());
        for _ in 0..cells.len() {
            let mut digits = [1u8, 2, 3, 4, 5, 6, 7, 8, 9];
            self.rng.shuffle(&mut digits);
            orders.push(digits);
        }

        // next[i] = how many candidates cell i has consumed so far.
        let mut next = [0usize; 81];
        let mut i = 0;
        while i < cells.len() {
            let pos = cells[i];
            let mut placed = false;
            while next[i] < 9 {
                let value = orders[i][next[i]];
                next[i] += 1;
                if grid.is_valid_placement(pos, value) {
                    grid.set(pos, Some(value));
                    placed = true;
                    break;
                }
            }

            if placed {
                i += 1;
            } else {
                // Candidates exhausted: reset this cell and step back to
                // retry the previous one. The first cell always accepts a
                // digit on an empty board, so the cursor never underflows.
                next[i] = 0;
                grid.set(pos, None);
                i -= 1;
                grid.set(cells[i], None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit_is_permutation(values: &mut Vec<u8>) {
        values.sort_unstable();
        assert_eq!(*values, (1..=9).collect::<Vec<u8>>());
    }

    #[test]
    fn test_solution_rows_columns_boxes() {
        let mut generator = Generator::with_seed(42);
        let solution = generator.generate_solution();

        for row in 0..9 {
            let mut values: Vec<u8> = (0..9)
                .filter_map(|col| solution.get(Position::new(row, col)))
                .collect();
            assert_unit_is_permutation(&mut values);
        }

        for col in 0..9 {
            let mut values: Vec<u8> = (0..9)
                .filter_map(|row| solution.get(Position::new(row, col)))
                .collect();
            assert_unit_is_permutation(&mut values);
        }

        for box_row in (0..9).step_by(3) {
            for box_col in (0..9).step_by(3) {
                let mut values = Vec::new();
                for row in box_row..box_row + 3 {
                    for col in box_col..box_col + 3 {
                        if let Some(v) = solution.get(Position::new(row, col)) {
                            values.push(v);
                        }
                    }
                }
                assert_unit_is_permutation(&mut values);
            }
        }
    }

    #[test]
    fn test_same_seed_reproduces_the_same_game() {
        let mut a = Generator::with_seed(42);
        let mut b = Generator::with_seed(42);

        let (puzzle_a, solution_a) = a.generate(Difficulty::Medium);
        let (puzzle_b, solution_b) = b.generate(Difficulty::Medium);

        assert_eq!(puzzle_a.to_string_compact(), puzzle_b.to_string_compact());
        assert_eq!(
            solution_a.to_string_compact(),
            solution_b.to_string_compact()
        );
    }

    #[test]
    fn test_different_seeds_give_different_solutions() {
        let mut a = Generator::with_seed(1);
        let mut b = Generator::with_seed(2);

        assert_ne!(
            a.generate_solution().to_string_compact(),
            b.generate_solution().to_string_compact()
        );
    }

    #[test]
    fn test_difficulty_controls_given_count() {
        let mut generator = Generator::with_seed(7);

        let (easy, _) = generator.generate(Difficulty::Easy);
        assert_eq!(easy.given_count(), 41);
        assert_eq!(easy.empty_count(), 40);

        let (medium, _) = generator.generate(Difficulty::Medium);
        assert_eq!(medium.given_count(), 31);
        assert_eq!(medium.empty_count(), 50);

        let (hard, _) = generator.generate(Difficulty::Hard);
        assert_eq!(hard.given_count(), 21);
        assert_eq!(hard.empty_count(), 60);
    }

    #[test]
    fn test_puzzle_agrees_with_its_solution() {
        let mut generator = Generator::with_seed(123);
        let (puzzle, solution) = generator.generate(Difficulty::Medium);

        for pos in Position::all() {
            match puzzle.get(pos) {
                Some(value) => {
                    assert!(puzzle.cell(pos).is_given());
                    assert_eq!(Some(value), solution.get(pos));
                }
                None => assert!(!puzzle.cell(pos).is_given()),
            }
        }
    }

    #[test]
    fn test_derived_puzzle_is_solvable() {
        use crate::solver::Solver;

        let mut generator = Generator::with_seed(9);
        let (puzzle, _) = generator.generate(Difficulty::Hard);

        let solver = Solver::new();
        let solved = solver.solve(&puzzle).unwrap();
        assert!(solved.is_solved());
    }

    #[test]
    fn test_difficulty_parse_and_display() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("MEDIUM".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("brutal".parse::<Difficulty>().is_err());

        assert_eq!(Difficulty::Medium.to_string(), "Medium");
    }

    #[test]
    fn test_difficulty_serde() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"Hard\"");
        let parsed: Difficulty = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Difficulty::Hard);
    }
}
