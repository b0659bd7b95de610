use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_HALF_BLOCK, CELL_WIDTH, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD,
    GLYPH_SNAKE_TAIL, PALETTE,
};
use crate::game::{GameState, GameStatus};
use crate::snake::Position;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::leaderboard::{LEADERBOARD_WIDTH, LeaderboardRow, render_leaderboard};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full frame from an immutable game state.
pub fn render(
    frame: &mut Frame<'_>,
    state: &GameState,
    hud_info: &HudInfo<'_>,
    leaderboard: &[LeaderboardRow],
) {
    let [game_column, side_panel] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(LEADERBOARD_WIDTH)])
            .areas(frame.area());

    render_leaderboard(frame, side_panel, leaderboard, hud_info.username);

    let board_area = render_hud(frame, game_column, state, hud_info);
    let play_area = centered_board(board_area, state.board_size());

    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(PALETTE.border_fg).bg(PALETTE.border_bg))
        .style(Style::new().bg(PALETTE.play_bg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, state);
    render_snake(frame, inner, state);

    match state.status() {
        GameStatus::Ready => render_start_menu(frame, play_area, hud_info),
        GameStatus::Paused => render_pause_menu(frame, play_area),
        GameStatus::GameOver => render_game_over_menu(
            frame,
            play_area,
            state.score(),
            hud_info.best_before_run,
            state.game_over_reason(),
        ),
        GameStatus::Playing => {}
    }
}

/// Board rectangle (including border) centered inside `area`, clipped to fit.
fn centered_board(area: Rect, board_size: u16) -> Rect {
    let width = (board_size * CELL_WIDTH + 2).min(area.width);
    let height = (board_size + 2).min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let Some((x, y)) = logical_to_terminal(inner, state.board_size(), state.food()) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(PALETTE.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let snake = state.snake();
    let head = snake.head();
    let tail = snake.tail();

    let buffer = frame.buffer_mut();
    for segment in snake.segments() {
        let Some((x, y)) = logical_to_terminal(inner, state.board_size(), *segment) else {
            continue;
        };

        let (glyph, style) = if *segment == head {
            (
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(PALETTE.snake_head)
                    .add_modifier(Modifier::BOLD),
            )
        } else if *segment == tail {
            (GLYPH_SNAKE_TAIL, Style::new().fg(PALETTE.snake_tail))
        } else {
            (GLYPH_SNAKE_BODY, Style::new().fg(PALETTE.snake_body))
        };
        buffer.set_string(x, y, glyph, style);
    }
}

fn logical_to_terminal(inner: Rect, board_size: u16, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(board_size) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x + CELL_WIDTH > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{centered_board, logical_to_terminal};
    use crate::snake::Position;

    #[test]
    fn cells_are_two_columns_wide() {
        let inner = Rect::new(1, 1, 40, 20);

        assert_eq!(
            logical_to_terminal(inner, 20, Position::new(3, 4)),
            Some((7, 5))
        );
        assert_eq!(logical_to_terminal(inner, 20, Position::new(20, 4)), None);
    }

    #[test]
    fn board_is_centered_and_clipped() {
        let area = Rect::new(0, 0, 60, 30);
        assert_eq!(centered_board(area, 20), Rect::new(9, 4, 42, 22));

        let small = Rect::new(0, 0, 10, 5);
        assert_eq!(centered_board(small, 20), Rect::new(0, 0, 10, 5));
    }
}
