#![allow(clippy::format_in_format_args)]

mod app;
mod game;
mod render;
mod stats;
mod theme;

use app::App;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::GameSummary;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use zendoku_core::Difficulty;

#[derive(Parser)]
#[command(name = "zendoku")]
#[command(about = "Terminal Sudoku for a daily brain break")]
#[command(version)]
struct Cli {
    /// Difficulty of the first puzzle (easy, medium, or hard)
    #[arg(short, long, default_value = "medium")]
    difficulty: Difficulty,

    /// Deal a reproducible first puzzle from this seed
    #[arg(long)]
    seed: Option<u64>,

    /// Color theme
    #[arg(long, default_value = "dark", value_parser = ["dark", "light", "high-contrast"])]
    theme: String,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let theme_index = match cli.theme.as_str() {
        "light" => 1,
        "high-contrast" => 2,
        _ => 0,
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Run the app
    let result = run_app(&mut stdout, cli.difficulty, cli.seed, theme_index);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    match result {
        Ok(summary) => print_session_report(&summary),
        Err(e) => eprintln!("Error: {}", e),
    }

    Ok(())
}

fn run_app(
    stdout: &mut io::Stdout,
    difficulty: Difficulty,
    seed: Option<u64>,
    theme_index: usize,
) -> io::Result<GameSummary> {
    let mut app = App::new(difficulty, seed, theme_index);
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        // Render
        render::render(stdout, &app)?;
        stdout.flush()?;

        // Handle input with a timeout so the clock keeps ticking
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    app.record_abandoned();
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        // Tick the message timer and completion check
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(app.game.summary())
}

fn print_session_report(summary: &GameSummary) {
    if summary.completed {
        println!(
            "Solved a {} puzzle in {} with {} mistakes and {} hints. +{} coins!",
            summary.difficulty,
            stats::format_time(summary.elapsed.as_secs()),
            summary.mistakes,
            summary.hints_used,
            summary.coins
        );
    } else {
        println!("See you at the next break.");
    }
}
