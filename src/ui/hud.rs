use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::{Difficulty, PALETTE};
use crate::game::GameState;

const HUD_MARGIN_X: u16 = 1;

/// Values the HUD shows that do not live in the game state.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    /// Logged-in player, `None` for guests.
    pub username: Option<&'a str>,
    /// Best score known when the current run started.
    pub best_before_run: u32,
    /// Difficulty queued for the next reset, if different from the board's.
    pub pending_difficulty: Option<Difficulty>,
}

/// Draws the two HUD rows under the board and returns the remaining area.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    info: &HudInfo<'_>,
) -> Rect {
    let [board_area, score_row, settings_row] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(score_line(state, info)).alignment(Alignment::Center),
        inset_horizontal(score_row, HUD_MARGIN_X),
    );
    frame.render_widget(
        Paragraph::new(settings_line(state, info))
            .alignment(Alignment::Center)
            .style(Style::new().fg(PALETTE.menu_footer)),
        inset_horizontal(settings_row, HUD_MARGIN_X),
    );

    board_area
}

fn score_line(state: &GameState, info: &HudInfo<'_>) -> Line<'static> {
    let score = state.score();
    let best = score.max(info.best_before_run);
    let value = Style::new().fg(PALETTE.hud_text).add_modifier(Modifier::BOLD);
    let best_style = if score > info.best_before_run {
        Style::new().fg(PALETTE.hud_highlight).add_modifier(Modifier::BOLD)
    } else {
        value
    };

    Line::from(vec![
        Span::raw("Player: "),
        Span::styled(info.username.unwrap_or("guest").to_owned(), value),
        Span::raw("  Score: "),
        Span::styled(score.to_string(), value),
        Span::raw("  Best: "),
        Span::styled(best.to_string(), best_style),
        Span::raw("  Length: "),
        Span::styled(state.snake().len().to_string(), value),
    ])
}

fn settings_line(state: &GameState, info: &HudInfo<'_>) -> String {
    let settings = state.settings();
    let mut line = format!(
        "Speed {} ({})  Difficulty {}",
        settings.speed.get(),
        settings.speed.label(),
        state.active_difficulty().label(),
    );
    if let Some(next) = info.pending_difficulty {
        line.push_str(&format!(" -> {} on restart", next.label()));
    }
    line
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(margin.saturating_mul(2)),
        height: area.height,
    }
}
