use crate::rng::SimpleRng;
use crate::{Grid, Position};

/// A suggested move: the correct digit for one empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub pos: Position,
    pub value: u8,
}

/// Backtracking Sudoku solver.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Solve the grid, returning the completed board or `None` when no
    /// solution exists. The input is untouched; filled cells keep their
    /// values in the result. Iterative backtracking, same cursor scheme
    /// as the generator's fill but with candidates tried in ascending
    /// order, so the result is deterministic for a given board.
    pub fn solve(&self, grid: &Grid) -> Option<Grid> {
        // A board that already violates a constraint has no solution.
        // Without this check the search would happily fill in the rest
        // around the conflict.
        if !grid.is_valid() {
            return None;
        }

        let mut work = grid.clone();
        let open: Vec<Position> = work.empty_positions();

        // next[i] = last candidate digit cell i tried (0 = none yet).
        let mut next = vec![0u8; open.len()];
        let mut i = 0;
        while i < open.len() {
            let pos = open[i];
            let mut placed = false;
            while next[i] < 9 {
                next[i] += 1;
                let value = next[i];
                if work.is_valid_placement(pos, value) {
                    work.set(pos, Some(value));
                    placed = true;
                    break;
                }
            }

            if placed {
                i += 1;
            } else {
                next[i] = 0;
                work.set(pos, None);
                if i == 0 {
                    return None;
                }
                i -= 1;
                work.set(open[i], None);
            }
        }

        Some(work)
    }

    /// Suggest the solver's digit for one randomly chosen empty cell.
    /// Returns `None` when the board is already full, or when it cannot
    /// be completed from its current state (a hint would only cement a
    /// dead end).
    pub fn hint(&self, grid: &Grid, rng: &mut SimpleRng) -> Option<Hint> {
        let open = grid.empty_positions();
        if open.is_empty() {
            return None;
        }

        let solved = self.solve(grid)?;
        let pos = open[rng.next_usize(open.len())];
        let value = solved.get(pos)?;
        Some(Hint { pos, value })
    }
}
