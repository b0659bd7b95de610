use std::time::Duration;

use clap::ValueEnum;
use ratatui::style::Color;
use ratatui::symbols::border;

use crate::error::SettingsError;

/// Number of segments a freshly reset snake starts with.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Score granted per food item.
pub const FOOD_REWARD: u32 = 10;

/// Random draws attempted before food placement scans for free cells.
pub const FOOD_SAMPLE_ATTEMPTS: usize = 64;

/// Tick interval per speed level, slowest first.
pub const SPEED_LEVEL_INTERVALS_MS: [u64; 5] = [200, 150, 100, 75, 50];

/// Storage key for the serialized user list.
pub const USERS_KEY: &str = "snake_game_users";

/// Storage key for the logged-in user id.
pub const CURRENT_USER_KEY: &str = "snake_game_current_user";

/// Directory name under the platform data dir.
pub const APP_DIR_NAME: &str = "snake-arcade";

/// Log file written inside the data dir.
pub const LOG_FILE_NAME: &str = "snake-arcade.log";

/// Number of rows shown on the leaderboard panel.
pub const LEADERBOARD_SIZE: usize = 10;

/// Discrete speed setting, 1 (very slow) through 5 (very fast).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SpeedLevel(u8);

impl SpeedLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Base tick interval before the difficulty multiplier.
    #[must_use]
    pub fn base_interval_ms(self) -> u64 {
        SPEED_LEVEL_INTERVALS_MS[usize::from(self.0 - Self::MIN)]
    }

    /// Human label matching the settings screen wording.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Very Slow",
            2 => "Slow",
            3 => "Normal",
            4 => "Fast",
            _ => "Very Fast",
        }
    }
}

impl Default for SpeedLevel {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for SpeedLevel {
    type Error = SettingsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SettingsError::SpeedOutOfRange(value))
        }
    }
}

/// Difficulty presets. Each one fixes the board size and growth per food.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Side length of the square board.
    #[must_use]
    pub fn board_size(self) -> u16 {
        match self {
            Self::Easy => 25,
            Self::Medium => 20,
            Self::Hard => 15,
        }
    }

    /// Segments added per food eaten.
    #[must_use]
    pub fn growth_rate(self) -> u32 {
        match self {
            Self::Easy | Self::Medium => 1,
            Self::Hard => 2,
        }
    }

    /// Multiplier applied to the speed level interval.
    #[must_use]
    pub fn speed_multiplier(self) -> f64 {
        match self {
            Self::Easy => 1.2,
            Self::Medium => 1.0,
            Self::Hard => 0.8,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// Player-adjustable engine settings.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct GameSettings {
    pub speed: SpeedLevel,
    pub difficulty: Difficulty,
}

impl GameSettings {
    /// Interval between ticks for these settings.
    #[must_use]
    pub fn tick_interval(self) -> Duration {
        let base = self.speed.base_interval_ms() as f64;
        let scaled = (base * self.difficulty.speed_multiplier()).round() as u64;
        Duration::from_millis(scaled)
    }
}

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Each logical cell is drawn two terminal columns wide so the board looks square.
pub const CELL_WIDTH: u16 = 2;

pub const GLYPH_SNAKE_HEAD: &str = "██";
pub const GLYPH_SNAKE_BODY: &str = "▓▓";
pub const GLYPH_SNAKE_TAIL: &str = "▒▒";
pub const GLYPH_FOOD: &str = "● ";

/// Colors used across the board, HUD and popups.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_text: Color,
    pub hud_highlight: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const PALETTE: Palette = Palette {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::LightRed,
    play_bg: Color::Black,
    border_fg: Color::Gray,
    border_bg: Color::Black,
    hud_text: Color::White,
    hud_highlight: Color::Yellow,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Difficulty, GameSettings, SpeedLevel};
    use crate::error::SettingsError;

    #[test]
    fn speed_level_rejects_out_of_range_values() {
        assert_eq!(
            SpeedLevel::try_from(0),
            Err(SettingsError::SpeedOutOfRange(0))
        );
        assert_eq!(
            SpeedLevel::try_from(6),
            Err(SettingsError::SpeedOutOfRange(6))
        );
        assert_eq!(SpeedLevel::try_from(5).map(SpeedLevel::get), Ok(5));
    }

    #[test]
    fn slower_levels_have_larger_intervals() {
        let intervals: Vec<u64> = (1..=5)
            .map(|level| {
                SpeedLevel::try_from(level)
                    .expect("level should be valid")
                    .base_interval_ms()
            })
            .collect();

        assert_eq!(intervals, vec![200, 150, 100, 75, 50]);
    }

    #[test]
    fn tick_interval_applies_difficulty_multiplier() {
        let easy = GameSettings {
            speed: SpeedLevel::default(),
            difficulty: Difficulty::Easy,
        };
        let hard = GameSettings {
            speed: SpeedLevel::default(),
            difficulty: Difficulty::Hard,
        };

        assert_eq!(easy.tick_interval(), Duration::from_millis(120));
        assert_eq!(hard.tick_interval(), Duration::from_millis(80));
        assert_eq!(
            GameSettings::default().tick_interval(),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn difficulty_presets_match_board_sizes() {
        assert_eq!(Difficulty::Easy.board_size(), 25);
        assert_eq!(Difficulty::Medium.board_size(), 20);
        assert_eq!(Difficulty::Hard.board_size(), 15);
        assert_eq!(Difficulty::Hard.growth_rate(), 2);
    }
}
