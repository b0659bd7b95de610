use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::PALETTE;
use crate::game::GameOverReason;
use crate::ui::hud::HudInfo;

/// Draws the ready screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, info: &HudInfo<'_>) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::new()
                    .fg(PALETTE.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let greeting = match info.username {
        Some(name) => format!("Welcome back, {name}"),
        None => "Playing as guest".to_owned(),
    };
    let body = vec![
        Line::from(greeting),
        Line::from(format!("Best: {}", info.best_before_run)),
        Line::from(""),
        Line::from("[Enter]/[Space] Start"),
        Line::from("[1-5] Speed  [E/M/H] Difficulty"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" ready ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Arrows/WASD to move, P to pause"))
            .alignment(Alignment::Center)
            .style(Style::new().fg(PALETTE.menu_footer)),
        footer_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 60, 30);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[P] Resume"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    best_before_run: u32,
    reason: Option<GameOverReason>,
) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let is_new_best = score > best_before_run;
    let lines = vec![
        Line::from("GAME OVER"),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(format!("Best: {}", score.max(best_before_run))),
        Line::from(reason_text(reason)),
        Line::from(if is_new_best { "New high score!" } else { "" }),
        Line::from(""),
        Line::from("[Enter]/[Space] Play Again"),
        Line::from("[Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn reason_text(reason: Option<GameOverReason>) -> &'static str {
    match reason {
        Some(GameOverReason::WallCollision) => "Cause: hit wall",
        Some(GameOverReason::SelfCollision) => "Cause: hit yourself",
        Some(GameOverReason::BoardFilled) => "Board cleared!",
        None => "",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
