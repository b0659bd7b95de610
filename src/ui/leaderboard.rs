use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::account::User;
use crate::config::PALETTE;

/// Columns reserved for the side panel.
pub const LEADERBOARD_WIDTH: u16 = 30;

const NAME_COLUMN: usize = 16;

/// One ranked line of the leaderboard panel.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub username: String,
    pub high_score: u32,
}

impl LeaderboardRow {
    /// Ranks `users`, which must already be sorted best first.
    #[must_use]
    pub fn from_ranked(users: &[&User]) -> Vec<Self> {
        users
            .iter()
            .enumerate()
            .map(|(index, user)| Self {
                rank: index + 1,
                username: user.username.clone(),
                high_score: user.high_score,
            })
            .collect()
    }

    fn text(&self) -> String {
        let mut name = self.username.clone();
        if name.chars().count() > NAME_COLUMN {
            name = name.chars().take(NAME_COLUMN - 1).collect();
            name.push('…');
        }
        format!(
            "{:>2}. {name:<width$} {:>6}",
            self.rank,
            self.high_score,
            width = NAME_COLUMN
        )
    }
}

/// Draws the top scores, highlighting the logged-in player.
pub fn render_leaderboard(
    frame: &mut Frame<'_>,
    area: Rect,
    rows: &[LeaderboardRow],
    current_username: Option<&str>,
) {
    let lines: Vec<Line> = if rows.is_empty() {
        vec![Line::from("No scores yet")]
    } else {
        rows.iter()
            .map(|row| {
                let style = if current_username == Some(row.username.as_str()) {
                    Style::new()
                        .fg(PALETTE.hud_highlight)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::new().fg(PALETTE.hud_text)
                };
                Line::styled(row.text(), style)
            })
            .collect()
    };

    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" leaderboard ")),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::LeaderboardRow;

    #[test]
    fn long_names_are_truncated_to_the_column() {
        let row = LeaderboardRow {
            rank: 1,
            username: "a_very_long_player_name".to_owned(),
            high_score: 200,
        };

        assert_eq!(row.text(), " 1. a_very_long_pla…    200");
    }

    #[test]
    fn short_names_are_padded() {
        let row = LeaderboardRow {
            rank: 10,
            username: "demo".to_owned(),
            high_score: 50,
        };

        assert_eq!(row.text(), "10. demo                 50");
    }
}
