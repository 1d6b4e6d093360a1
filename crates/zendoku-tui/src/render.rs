use crate::app::{App, MenuState, ScreenState};
use crate::stats::format_time;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io;
use zendoku_core::{Difficulty, Position};

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide, Clear(ClearType::All))?;

    match app.screen_state {
        ScreenState::Win => render_win_screen(stdout, app, term_width)?,
        ScreenState::Playing => render_game_screen(stdout, app, term_width, term_height)?,
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    // Grid is 37 chars wide, 19 tall: 3-char cells plus borders.
    let grid_width: u16 = 37;
    let grid_height: u16 = 19;

    // Center the grid horizontally, leave room for info panel
    let total_width = grid_width + 25; // grid + gap + info panel
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };

    let start_y = if term_height > grid_height + 8 { 2 } else { 1 };

    render_grid(stdout, app, start_x, start_y)?;

    let info_x = start_x + grid_width + 3;
    render_info_panel(stdout, app, info_x, start_y)?;

    let controls_y = start_y + grid_height + 1;
    render_controls(stdout, app, start_x, controls_y)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    if app.menu != MenuState::None {
        render_menu(stdout, app, term_width, term_height)?;
    }

    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    // Top border (thick)
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.box_border),
        Print("+===+===+===+===+===+===+===+===+===+")
    )?;

    for row in 0..9 {
        let cell_y = y + 1 + row as u16 * 2;

        // Cell row
        execute!(stdout, MoveTo(x, cell_y))?;

        for col in 0..9 {
            // Left border - thick at 3x3 boundaries
            if col % 3 == 0 {
                execute!(stdout, SetForegroundColor(theme.box_border), Print("║"))?;
            } else {
                execute!(stdout, SetForegroundColor(theme.border), Print("│"))?;
            }

            let pos = Position::new(row, col);
            render_cell(stdout, app, pos)?;
        }
        execute!(stdout, SetForegroundColor(theme.box_border), Print("║"))?;

        // Horizontal separator
        execute!(stdout, MoveTo(x, cell_y + 1))?;
        if (row + 1) % 3 == 0 {
            execute!(
                stdout,
                SetForegroundColor(theme.box_border),
                Print("+===+===+===+===+===+===+===+===+===+")
            )?;
        } else {
            execute!(
                stdout,
                SetForegroundColor(theme.border),
                Print("+---+---+---+---+---+---+---+---+---+")
            )?;
        }
    }

    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, pos: Position) -> io::Result<()> {
    let theme = &app.theme;
    let game = &app.game;
    let cell = game.grid().cell(pos);
    let is_cursor = pos == app.cursor;

    // Background color
    let bg = if is_cursor {
        theme.selected_bg
    } else if app.has_same_value(pos) && !cell.is_empty() {
        Color::Rgb {
            r: 60,
            g: 60,
            b: 100,
        }
    } else if app.is_highlighted(pos) {
        theme.highlight_bg
    } else {
        theme.bg
    };

    // Foreground color
    let fg = if game.has_conflict(pos) {
        theme.error
    } else if cell.is_given() {
        theme.given
    } else {
        theme.filled
    };

    execute!(stdout, SetBackgroundColor(bg), SetForegroundColor(fg))?;

    // Cell content: 3 chars " X "
    match cell.value() {
        Some(value) => execute!(stdout, Print(format!(" {} ", value)))?,
        None => execute!(stdout, SetForegroundColor(Color::DarkGrey), Print(" · "))?,
    }

    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let game = &app.game;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    // Title
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("═══ ZENDOKU ═══")
    )?;

    // Time
    let time_str = if game.is_paused() {
        "paused".to_string()
    } else {
        game.elapsed_string()
    };
    execute!(
        stdout,
        MoveTo(x, y + 2),
        SetForegroundColor(theme.info),
        Print(format!("Time: {:>10}", time_str))
    )?;

    // Difficulty
    execute!(
        stdout,
        MoveTo(x, y + 4),
        SetForegroundColor(theme.info),
        Print(format!("Level: {:>9}", format!("{}", game.difficulty())))
    )?;

    // Mistakes
    let mistakes_color = if game.mistakes() > 0 {
        Color::Yellow
    } else {
        theme.info
    };
    execute!(
        stdout,
        MoveTo(x, y + 6),
        SetForegroundColor(mistakes_color),
        Print(format!("Mistakes: {:>6}", game.mistakes()))
    )?;

    // Hints
    execute!(
        stdout,
        MoveTo(x, y + 8),
        SetForegroundColor(theme.info),
        Print(format!("Hints used: {:>4}", game.hints_used()))
    )?;

    // Separator
    execute!(
        stdout,
        MoveTo(x, y + 10),
        SetForegroundColor(theme.border),
        Print("────────────────")
    )?;

    // Personal records
    let best_str = app
        .stats
        .best_time(game.difficulty())
        .map(format_time)
        .unwrap_or_else(|| "--:--".to_string());
    execute!(
        stdout,
        MoveTo(x, y + 12),
        SetForegroundColor(theme.info),
        Print(format!("Best: {:>10}", best_str))
    )?;

    execute!(
        stdout,
        MoveTo(x, y + 14),
        SetForegroundColor(theme.key),
        Print(format!("Coins: {:>9}", app.stats.total_coins))
    )?;

    // Current cell
    execute!(
        stdout,
        MoveTo(x, y + 16),
        SetForegroundColor(theme.info),
        Print(format!(
            "Cell: Row {} Col {}",
            app.cursor.row + 1,
            app.cursor.col + 1
        ))
    )?;

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let controls = [
        ("hjkl/Arrows", "Move"),
        ("wasd", "Jump box"),
        ("1-9", "Place"),
        ("0/Del", "Clear"),
        ("?", "Hint"),
        ("p", "Pause"),
        ("n", "New game"),
        ("t", "Theme"),
        ("q", "Quit"),
    ];

    // Display in columns of 3
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 3;
        let row = i % 3;
        let cx = x + (col as u16) * 22;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>11}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.len() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.selected_bg),
        Print(&padded)
    )?;

    Ok(())
}

fn render_menu(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;

    let difficulties: [(&str, Color); 3] = [
        ("Easy", Color::Green),
        ("Medium", Color::Yellow),
        (
            "Hard",
            Color::Rgb {
                r: 255,
                g: 165,
                b: 0,
            },
        ),
    ];

    let menu_width: u16 = 30;
    let menu_height: u16 = (difficulties.len() + 5) as u16; // title + options + padding
    let x = (term_width.saturating_sub(menu_width)) / 2;
    let y = (term_height.saturating_sub(menu_height)) / 2;

    let bg = Color::Rgb {
        r: 30,
        g: 30,
        b: 40,
    };

    // Background
    for row in 0..menu_height {
        execute!(
            stdout,
            MoveTo(x, y + row),
            SetBackgroundColor(bg),
            Print(" ".repeat(menu_width as usize))
        )?;
    }

    // Border
    execute!(
        stdout,
        SetForegroundColor(theme.border),
        SetBackgroundColor(bg)
    )?;
    execute!(
        stdout,
        MoveTo(x, y),
        Print("┌"),
        Print("─".repeat(menu_width as usize - 2)),
        Print("┐")
    )?;
    for row in 1..menu_height - 1 {
        execute!(stdout, MoveTo(x, y + row), Print("│"))?;
        execute!(stdout, MoveTo(x + menu_width - 1, y + row), Print("│"))?;
    }
    execute!(
        stdout,
        MoveTo(x, y + menu_height - 1),
        Print("└"),
        Print("─".repeat(menu_width as usize - 2)),
        Print("┘")
    )?;

    // Title
    let title = "Select Difficulty";
    let title_x = x + (menu_width.saturating_sub(title.len() as u16)) / 2;
    execute!(
        stdout,
        MoveTo(title_x, y + 1),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(bg),
        Print(title)
    )?;

    // Options
    for (i, (name, color)) in difficulties.iter().enumerate() {
        let selected = i == app.menu_selection;
        let (fg, item_bg) = if selected {
            (Color::Black, *color)
        } else {
            (*color, bg)
        };

        execute!(
            stdout,
            MoveTo(x + 2, y + 3 + i as u16),
            SetForegroundColor(fg),
            SetBackgroundColor(item_bg),
            Print(format!(" {:^24} ", name))
        )?;
    }

    Ok(())
}

fn render_win_screen(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    let game = &app.game;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let banner = "═══ PUZZLE COMPLETE ═══";
    let banner_x = term_width.saturating_sub(banner.chars().count() as u16) / 2;
    execute!(
        stdout,
        MoveTo(banner_x, 3),
        SetForegroundColor(theme.success),
        Print(banner)
    )?;

    // Session stats box
    let stats = format!(
        "Time: {} | Mistakes: {} | Hints: {} | Level: {}",
        game.elapsed_string(),
        game.mistakes(),
        game.hints_used(),
        game.difficulty()
    );
    let stats_x = term_width.saturating_sub(stats.len() as u16 + 2) / 2;
    execute!(
        stdout,
        MoveTo(stats_x, 6),
        SetForegroundColor(Color::White),
        SetBackgroundColor(Color::Rgb {
            r: 30,
            g: 50,
            b: 30
        }),
        Print(format!(" {} ", stats))
    )?;

    let coins = format!(
        "Coins earned: {} (total {})",
        game.coins_earned(),
        app.stats.total_coins
    );
    let coins_x = term_width.saturating_sub(coins.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(coins_x, 8),
        SetForegroundColor(theme.key),
        SetBackgroundColor(theme.bg),
        Print(coins)
    )?;

    if app.new_best {
        let best = format!("New best time for {}!", game.difficulty());
        let best_x = term_width.saturating_sub(best.len() as u16) / 2;
        execute!(
            stdout,
            MoveTo(best_x, 10),
            SetForegroundColor(theme.success),
            Print(best)
        )?;
    }

    // Breathing line, in the spirit of the wellness break
    let calm = match app.game.difficulty() {
        Difficulty::Easy => "Nice and steady. Take a breath before the next one.",
        Difficulty::Medium => "Good focus. Roll your shoulders back and relax.",
        Difficulty::Hard => "That was a workout. Look away from the screen for a moment.",
    };
    let calm_x = term_width.saturating_sub(calm.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(calm_x, 12),
        SetForegroundColor(theme.info),
        Print(calm)
    )?;

    let instr = "Press Enter for a rematch, 'n' for a new game, 'q' to quit";
    let instr_x = term_width.saturating_sub(instr.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(instr_x, 14),
        SetForegroundColor(Color::Yellow),
        Print(instr)
    )?;

    Ok(())
}
