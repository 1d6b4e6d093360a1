use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use zendoku_core::Difficulty;

/// Persistent player statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Best completion time in seconds, per difficulty
    pub best_times: HashMap<Difficulty, u64>,
    /// Coins earned across all completed games
    pub total_coins: u64,
    pub games_completed: usize,
    pub games_abandoned: usize,
}

impl Stats {
    /// Get the save file path
    fn save_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("zendoku_stats.json")
    }

    /// Load stats from file, falling back to empty stats
    pub fn load() -> Self {
        match fs::read_to_string(Self::save_path()) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save stats to file (best effort)
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = fs::write(Self::save_path(), json);
        }
    }

    /// Record a completed game. Returns true when the time is a new best
    /// for that difficulty.
    pub fn record_win(&mut self, difficulty: Difficulty, time_secs: u64, coins: u64) -> bool {
        self.games_completed += 1;
        self.total_coins += coins;

        let new_best = match self.best_times.get(&difficulty) {
            Some(&best) => time_secs < best,
            None => true,
        };
        if new_best {
            self.best_times.insert(difficulty, time_secs);
        }
        new_best
    }

    /// Record a game left unfinished.
    pub fn record_abandoned(&mut self) {
        self.games_abandoned += 1;
    }

    /// Best completion time for a difficulty, if any game was won at it.
    pub fn best_time(&self, difficulty: Difficulty) -> Option<u64> {
        self.best_times.get(&difficulty).copied()
    }
}

/// Format seconds as MM:SS or HH:MM:SS
pub fn format_time(secs: u64) -> String {
    if secs >= 3600 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        let secs = secs % 60;
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{:02}:{:02}", mins, secs)
    }
}
