use std::time::{Duration, Instant};
use zendoku_core::{Difficulty, Generator, Grid, Position, SimpleRng, Solver};

/// What happened to an attempted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The write was refused (given cell, paused, or finished game).
    Rejected,
    /// The digit was placed and fits its row, column, and box.
    Placed,
    /// The digit was placed anyway, but conflicts with another cell.
    Mistake,
}

/// Snapshot of a finished game, for the post-session report.
#[derive(Debug, Clone)]
pub struct GameSummary {
    pub difficulty: Difficulty,
    pub completed: bool,
    pub elapsed: Duration,
    pub mistakes: usize,
    pub hints_used: usize,
    pub coins: u64,
}

/// The game state
pub struct Game {
    /// The current grid
    grid: Grid,
    /// Difficulty level
    difficulty: Difficulty,
    /// Randomness for hint cell selection
    rng: SimpleRng,
    /// Start time
    start_time: Instant,
    /// Elapsed time (for pause/resume)
    elapsed: Duration,
    /// Whether the game is paused
    paused: bool,
    /// Whether the game is completed
    completed: bool,
    /// Number of hints used
    hints_used: usize,
    /// Number of mistakes made
    mistakes: usize,
    /// Number of player moves (placements and clears)
    moves: usize,
}

impl Game {
    /// Create a new game with the specified difficulty.
    pub fn new(difficulty: Difficulty) -> Self {
        let mut generator = Generator::new();
        let (grid, _) = generator.generate(difficulty);
        Self::from_parts(grid, difficulty, SimpleRng::new())
    }

    /// Create a reproducible game: the same seed always deals the same
    /// puzzle and the same hint sequence.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        let mut generator = Generator::with_seed(seed);
        let (grid, _) = generator.generate(difficulty);
        Self::from_parts(grid, difficulty, SimpleRng::with_seed(seed))
    }

    fn from_parts(grid: Grid, difficulty: Difficulty, rng: SimpleRng) -> Self {
        Self {
            grid,
            difficulty,
            rng,
            start_time: Instant::now(),
            elapsed: Duration::ZERO,
            paused: false,
            completed: false,
            hints_used: 0,
            mistakes: 0,
            moves: 0,
        }
    }

    /// Get the current grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get the difficulty
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        if self.paused || self.completed {
            self.elapsed
        } else {
            self.elapsed + self.start_time.elapsed()
        }
    }

    /// Format the elapsed time as MM:SS
    pub fn elapsed_string(&self) -> String {
        let secs = self.elapsed().as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// Check if the game is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Check if the game is completed
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Get hints used count
    pub fn hints_used(&self) -> usize {
        self.hints_used
    }

    /// Get mistakes count
    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    /// Get total moves made
    pub fn moves_count(&self) -> usize {
        self.moves
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.completed {
            return;
        }

        if self.paused {
            // Resume: reset start time, keeping elapsed
            self.start_time = Instant::now();
        } else {
            // Pause: save current elapsed
            self.elapsed += self.start_time.elapsed();
        }
        self.paused = !self.paused;
    }

    /// Place a digit at a position. Conflicting digits are written anyway
    /// and counted as mistakes; only given cells refuse the write. The
    /// player sees the conflict and fixes it rather than being blocked.
    pub fn place(&mut self, pos: Position, value: u8) -> MoveOutcome {
        if self.completed || self.paused {
            return MoveOutcome::Rejected;
        }
        if self.grid.cell(pos).is_given() {
            return MoveOutcome::Rejected;
        }

        let fits = self.grid.is_valid_placement(pos, value);
        self.grid.set(pos, Some(value));
        self.moves += 1;

        if !fits {
            self.mistakes += 1;
        }

        self.check_completion();

        if fits {
            MoveOutcome::Placed
        } else {
            MoveOutcome::Mistake
        }
    }

    /// Clear a cell
    pub fn clear_cell(&mut self, pos: Position) -> bool {
        if self.completed || self.paused {
            return false;
        }

        let cell = self.grid.cell(pos);
        if cell.is_given() || cell.is_empty() {
            return false;
        }

        self.grid.set(pos, None);
        self.moves += 1;
        true
    }

    /// Fill one empty cell with the solver's digit for it. Returns the
    /// position that was filled, or `None` when the board is full, paused,
    /// finished, or cannot be completed from its current state.
    pub fn hint(&mut self) -> Option<Position> {
        if self.completed || self.paused {
            return None;
        }

        let solver = Solver::new();
        let hint = solver.hint(&self.grid, &mut self.rng)?;

        self.grid.set(hint.pos, Some(hint.value));
        self.hints_used += 1;
        self.check_completion();

        Some(hint.pos)
    }

    /// Check if a position's digit conflicts with another cell.
    pub fn has_conflict(&self, pos: Position) -> bool {
        match self.grid.get(pos) {
            Some(value) => !self.grid.is_valid_placement(pos, value),
            None => false,
        }
    }

    fn check_completion(&mut self) {
        if self.grid.is_solved() {
            self.completed = true;
            self.elapsed += self.start_time.elapsed();
        }
    }

    /// Coins awarded for the current counters. Base pay per difficulty,
    /// minus 3 per mistake and 5 per hint, plus a bonus for finishing
    /// under ten minutes. Never less than 10.
    pub fn coins_earned(&self) -> u64 {
        let base: i64 = match self.difficulty {
            Difficulty::Easy => 20,
            Difficulty::Medium => 35,
            Difficulty::Hard => 50,
        };

        let elapsed = self.elapsed().as_secs() as i64;
        let time_bonus = ((600 - elapsed) / 30).max(0);
        let coins = base - 3 * self.mistakes as i64 - 5 * self.hints_used as i64 + time_bonus;
        coins.max(10) as u64
    }

    /// Snapshot the session for reporting after the terminal is restored.
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            difficulty: self.difficulty,
            completed: self.completed,
            elapsed: self.elapsed(),
            mistakes: self.mistakes,
            hints_used: self.hints_used,
            coins: if self.completed { self.coins_earned() } else { 0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A seeded game plus the solution its puzzle was carved from.
    fn seeded_game(difficulty: Difficulty, seed: u64) -> (Game, Grid) {
        let game = Game::with_seed(difficulty, seed);
        let (_, solution) = Generator::with_seed(seed).generate(difficulty);
        (game, solution)
    }

    // Some empty cell and a digit that conflicts there.
    fn conflicting_move(grid: &Grid) -> (Position, u8) {
        for pos in Position::all() {
            if grid.get(pos).is_some() {
                continue;
            }
            for value in 1..=9 {
                if !grid.is_valid_placement(pos, value) {
                    return (pos, value);
                }
            }
        }
        panic!("puzzle has no conflicting move");
    }

    #[test]
    fn test_mistakes_are_placed_and_counted() {
        let (mut game, _) = seeded_game(Difficulty::Medium, 42);
        let (pos, value) = conflicting_move(game.grid());

        assert_eq!(game.place(pos, value), MoveOutcome::Mistake);
        assert_eq!(game.mistakes(), 1);
        // Permissive placement: the wrong digit is on the board.
        assert_eq!(game.grid().get(pos), Some(value));
        assert!(game.has_conflict(pos));
    }

    #[test]
    fn test_given_cells_reject_moves() {
        let (mut game, _) = seeded_game(Difficulty::Easy, 7);
        let given = Position::all()
            .find(|&p| game.grid().cell(p).is_given())
            .unwrap();

        assert_eq!(game.place(given, 1), MoveOutcome::Rejected);
        assert!(!game.clear_cell(given));
        assert_eq!(game.mistakes(), 0);
        assert_eq!(game.moves_count(), 0);
    }

    #[test]
    fn test_clear_cell() {
        let (mut game, _) = seeded_game(Difficulty::Medium, 42);
        let pos = Position::all()
            .find(|&p| game.grid().get(p).is_none())
            .unwrap();

        assert!(!game.clear_cell(pos));

        let value = (1..=9)
            .find(|&v| game.grid().is_valid_placement(pos, v))
            .unwrap();
        assert_eq!(game.place(pos, value), MoveOutcome::Placed);
        assert!(game.clear_cell(pos));
        assert_eq!(game.grid().get(pos), None);
    }

    #[test]
    fn test_paused_game_blocks_moves() {
        let (mut game, _) = seeded_game(Difficulty::Easy, 3);
        let pos = Position::all()
            .find(|&p| game.grid().get(p).is_none())
            .unwrap();

        game.toggle_pause();
        assert_eq!(game.place(pos, 5), MoveOutcome::Rejected);
        assert!(game.hint().is_none());

        game.toggle_pause();
        assert!(game.place(pos, 5) != MoveOutcome::Rejected);
    }

    #[test]
    fn test_completing_the_puzzle() {
        let (mut game, solution) = seeded_game(Difficulty::Easy, 42);

        for pos in Position::all() {
            if game.grid().get(pos).is_none() {
                let value = solution.get(pos).unwrap();
                assert_eq!(game.place(pos, value), MoveOutcome::Placed);
            }
        }

        assert!(game.is_completed());
        assert_eq!(game.mistakes(), 0);

        // Finished games freeze: no further edits, stable elapsed time.
        let pos = Position::new(0, 0);
        assert_eq!(game.place(pos, 1), MoveOutcome::Rejected);
        assert_eq!(game.elapsed(), game.elapsed());
    }

    #[test]
    fn test_hint_fills_a_cell_and_can_finish_the_game() {
        let (mut game, solution) = seeded_game(Difficulty::Easy, 9);

        // Fill everything but one cell, then let the hint finish it.
        let empty: Vec<Position> = game.grid().empty_positions();
        for &pos in &empty[..empty.len() - 1] {
            game.place(pos, solution.get(pos).unwrap());
        }
        assert!(!game.is_completed());

        let filled = game.hint().unwrap();
        assert_eq!(filled, empty[empty.len() - 1]);
        assert_eq!(game.hints_used(), 1);
        assert!(game.is_completed());

        assert!(game.hint().is_none());
    }

    #[test]
    fn test_coin_formula() {
        let (mut game, _) = seeded_game(Difficulty::Medium, 42);
        let (wrong_pos, wrong_value) = conflicting_move(game.grid());
        game.place(wrong_pos, wrong_value);
        game.clear_cell(wrong_pos);
        game.hint();

        // Finish from a solve of the board as it stands, so the fill
        // agrees with whatever digit the hint placed.
        let solved = Solver::new().solve(game.grid()).unwrap();
        for pos in Position::all() {
            if game.grid().get(pos).is_none() {
                game.place(pos, solved.get(pos).unwrap());
            }
        }
        assert!(game.is_completed());

        // Base 35, -3 for the mistake, -5 for the hint, +20 for finishing
        // within the first 30 seconds.
        assert_eq!(game.mistakes(), 1);
        assert_eq!(game.hints_used(), 1);
        assert_eq!(game.coins_earned(), 35 - 3 - 5 + 20);
    }

    #[test]
    fn test_coins_never_drop_below_floor() {
        let (mut game, _) = seeded_game(Difficulty::Easy, 11);
        for _ in 0..30 {
            game.hint();
        }
        assert!(game.coins_earned() >= 10);
    }

    #[test]
    fn test_summary_reflects_outcome() {
        let (mut game, solution) = seeded_game(Difficulty::Hard, 5);

        let abandoned = game.summary();
        assert!(!abandoned.completed);
        assert_eq!(abandoned.coins, 0);

        for pos in Position::all() {
            if game.grid().get(pos).is_none() {
                game.place(pos, solution.get(pos).unwrap());
            }
        }

        let won = game.summary();
        assert!(won.completed);
        assert_eq!(won.difficulty, Difficulty::Hard);
        assert_eq!(won.coins, game.coins_earned());
    }
}
