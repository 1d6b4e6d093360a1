use crate::game::{Game, MoveOutcome};
use crate::stats::Stats;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use zendoku_core::{Difficulty, Position};

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal gameplay
    Playing,
    /// Win celebration screen
    Win,
}

/// Menu state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    None,
    NewGame,
}

/// The main application state
pub struct App {
    /// Current game
    pub game: Game,
    /// Currently selected cell position
    pub cursor: Position,
    /// Current menu state
    pub menu: MenuState,
    /// Selected menu item
    pub menu_selection: usize,
    /// Color theme
    pub theme: Theme,
    /// Index into the theme rotation
    theme_index: usize,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Persistent statistics
    pub stats: Stats,
    /// Whether current game has been recorded (to avoid double recording)
    game_recorded: bool,
    /// Whether the last win set a new best time
    pub new_best: bool,
}

const THEMES: [(&str, fn() -> Theme); 3] = [
    ("Dark", Theme::dark),
    ("Light", Theme::light),
    ("High contrast", Theme::high_contrast),
];

impl App {
    /// Create a new app with a freshly dealt game.
    pub fn new(difficulty: Difficulty, seed: Option<u64>, theme_index: usize) -> Self {
        let game = match seed {
            Some(seed) => Game::with_seed(difficulty, seed),
            None => Game::new(difficulty),
        };

        let theme_index = theme_index % THEMES.len();
        let (_, make_theme) = THEMES[theme_index];
        Self {
            game,
            cursor: Position::new(4, 4),
            menu: MenuState::None,
            menu_selection: 0,
            theme: make_theme(),
            theme_index,
            message: None,
            message_timer: 0,
            screen_state: ScreenState::Playing,
            stats: Stats::load(),
            game_recorded: false,
            new_best: false,
        }
    }

    /// Update timers and check for completion (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        // First tick after a win flips to the win screen. Once recorded,
        // the player may Esc back to inspect the finished board.
        if self.screen_state == ScreenState::Playing
            && self.game.is_completed()
            && !self.game_recorded
        {
            self.record_win();
            self.screen_state = ScreenState::Win;
        }
    }

    fn record_win(&mut self) {
        if self.game_recorded {
            return;
        }
        self.game_recorded = true;

        self.new_best = self.stats.record_win(
            self.game.difficulty(),
            self.game.elapsed().as_secs(),
            self.game.coins_earned(),
        );
        self.stats.save();
    }

    /// Record the current game as abandoned. Only counts games the
    /// player actually started, and never double-records.
    pub fn record_abandoned(&mut self) {
        if self.game_recorded || !self.game_in_progress() {
            return;
        }
        self.game_recorded = true;

        self.stats.record_abandoned();
        self.stats.save();
    }

    /// True when the player has started but not finished the current game.
    fn game_in_progress(&self) -> bool {
        !self.game.is_completed() && self.game.moves_count() > 0
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Win => self.handle_win_key(key),
            ScreenState::Playing => match self.menu {
                MenuState::None => self.handle_game_key(key),
                MenuState::NewGame => self.handle_menu_key(key),
            },
        }
    }

    fn handle_win_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char('n') => {
                // Pick a difficulty for the next game
                self.screen_state = ScreenState::Playing;
                self.menu = MenuState::NewGame;
                self.menu_selection = 0;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                // Quick restart with same difficulty
                self.start_game(self.game.difficulty());
            }
            KeyCode::Esc => {
                // Go back to the (finished) board view
                self.screen_state = ScreenState::Playing;
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            // Quit - record abandoned game if in progress
            KeyCode::Char('q') => {
                self.record_abandoned();
                return AppAction::Quit;
            }

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),

            // Jump to box
            KeyCode::Char('w') => self.jump_box(-1, 0),
            KeyCode::Char('s') => self.jump_box(1, 0),
            KeyCode::Char('a') => self.jump_box(0, -1),
            KeyCode::Char('d') => self.jump_box(0, 1),

            // Number input
            KeyCode::Char(c @ '1'..='9') => {
                let value = c.to_digit(10).unwrap() as u8;
                match self.game.place(self.cursor, value) {
                    MoveOutcome::Mistake => {
                        self.show_message("That digit conflicts with another cell");
                    }
                    MoveOutcome::Rejected => {
                        if self.game.grid().cell(self.cursor).is_given() {
                            self.show_message("Can't change a starting cell");
                        }
                    }
                    MoveOutcome::Placed => {}
                }
            }

            // Clear cell
            KeyCode::Char('0') | KeyCode::Delete | KeyCode::Backspace => {
                self.game.clear_cell(self.cursor);
            }

            // Hint: fill one cell with the solver's digit
            KeyCode::Char('?') => match self.game.hint() {
                Some(pos) => {
                    self.cursor = pos;
                    self.show_message("Hint applied");
                }
                None => self.show_message("No hint available"),
            },

            // New game menu
            KeyCode::Char('n') => {
                self.menu = MenuState::NewGame;
                self.menu_selection = 0;
            }

            // Pause
            KeyCode::Char('p') => {
                self.game.toggle_pause();
                if self.game.is_paused() {
                    self.show_message("Paused");
                } else {
                    self.show_message("Resumed");
                }
            }

            // Theme cycle
            KeyCode::Char('t') => {
                self.theme_index = (self.theme_index + 1) % THEMES.len();
                let (name, make) = THEMES[self.theme_index];
                self.theme = make();
                self.show_message(&format!("{} theme", name));
            }

            _ => {}
        }

        AppAction::Continue
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.menu = MenuState::None;
            }

            KeyCode::Up | KeyCode::Char('k') => {
                if self.menu_selection > 0 {
                    self.menu_selection -= 1;
                }
            }

            KeyCode::Down | KeyCode::Char('j') => {
                if self.menu_selection < Difficulty::all_levels().len() - 1 {
                    self.menu_selection += 1;
                }
            }

            KeyCode::Enter | KeyCode::Char(' ') => {
                let difficulty = Difficulty::all_levels()[self.menu_selection];
                // Swapping out an unfinished game abandons it.
                self.record_abandoned();
                self.start_game(difficulty);
            }

            _ => {}
        }

        AppAction::Continue
    }

    fn start_game(&mut self, difficulty: Difficulty) {
        self.game = Game::new(difficulty);
        self.cursor = Position::new(4, 4);
        self.menu = MenuState::None;
        self.screen_state = ScreenState::Playing;
        self.game_recorded = false;
        self.new_best = false;
        self.show_message(&format!("New {} game", difficulty));
    }

    fn move_cursor(&mut self, row_delta: i32, col_delta: i32) {
        let new_row = (self.cursor.row as i32 + row_delta).clamp(0, 8) as usize;
        let new_col = (self.cursor.col as i32 + col_delta).clamp(0, 8) as usize;
        self.cursor = Position::new(new_row, new_col);
    }

    fn jump_box(&mut self, row_delta: i32, col_delta: i32) {
        let box_row = (self.cursor.row / 3) as i32;
        let box_col = (self.cursor.col / 3) as i32;

        let new_box_row = (box_row + row_delta).clamp(0, 2) as usize;
        let new_box_col = (box_col + col_delta).clamp(0, 2) as usize;

        // Move to center of new box
        self.cursor = Position::new(new_box_row * 3 + 1, new_box_col * 3 + 1);
    }

    /// Check if a position is highlighted (same row, col, or box as cursor)
    pub fn is_highlighted(&self, pos: Position) -> bool {
        pos.row == self.cursor.row
            || pos.col == self.cursor.col
            || pos.box_index() == self.cursor.box_index()
    }

    /// Check if a position has the same value as the cursor
    pub fn has_same_value(&self, pos: Position) -> bool {
        if let Some(cursor_value) = self.game.grid().get(self.cursor) {
            self.game.grid().get(pos) == Some(cursor_value)
        } else {
            false
        }
    }
}
