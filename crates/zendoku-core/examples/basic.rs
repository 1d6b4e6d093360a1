//! Basic example of using the Sudoku engine

use zendoku_core::{Difficulty, Generator, Grid, SimpleRng, Solver};

fn main() {
    // Generate a puzzle
    println!("Generating a Medium difficulty puzzle...\n");
    let mut generator = Generator::new();
    let (puzzle, solution) = generator.generate(Difficulty::Medium);

    println!("Generated puzzle:");
    println!("{}", puzzle);

    // Show some stats
    println!("Given cells: {}", puzzle.given_count());
    println!("Empty cells: {}", puzzle.empty_count());

    println!("\nSolution it was carved from:");
    println!("{}", solution);

    // Get a hint for the puzzle
    let solver = Solver::new();
    let mut rng = SimpleRng::new();
    println!("\nGetting a hint for the puzzle:");
    if let Some(hint) = solver.hint(&puzzle, &mut rng) {
        println!(
            "Try a {} at row {}, column {}",
            hint.value,
            hint.pos.row + 1,
            hint.pos.col + 1
        );
    }

    // Parse a puzzle from a string
    println!("\n--- Parsing a puzzle from string ---\n");
    let puzzle_string = "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    if let Some(grid) = Grid::from_string(puzzle_string) {
        println!("Parsed puzzle:");
        println!("{}", grid);

        // Solve it
        println!("Solving...\n");
        if let Some(solved) = solver.solve(&grid) {
            println!("Solution:");
            println!("{}", solved);
        } else {
            println!("No solution found (this shouldn't happen for a well-formed puzzle!)");
        }
    }
}
