use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::{Difficulty, SpeedLevel};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step in grid coordinates. `y` grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Confirm,
    Speed(SpeedLevel),
    Difficulty(Difficulty),
    Quit,
}

/// Translates terminal key events into [`GameInput`].
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Polls for at most `timeout` and returns the next mapped input, if any.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Char('p' | 'P') => GameInput::Pause,
        KeyCode::Enter | KeyCode::Char(' ') => GameInput::Confirm,
        KeyCode::Char('e' | 'E') => GameInput::Difficulty(Difficulty::Easy),
        KeyCode::Char('m' | 'M') => GameInput::Difficulty(Difficulty::Medium),
        KeyCode::Char('h' | 'H') => GameInput::Difficulty(Difficulty::Hard),
        KeyCode::Char(digit @ '1'..='5') => {
            let level = u8::try_from(digit.to_digit(10)?).ok()?;
            GameInput::Speed(SpeedLevel::try_from(level).ok()?)
        }
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{Direction, GameInput, direction_change_is_valid, map_key};
    use crate::config::{Difficulty, SpeedLevel};

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn reversals_are_not_valid_changes() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        let press = |code| map_key(KeyEvent::new(code, KeyModifiers::NONE));

        assert_eq!(
            press(KeyCode::Left),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            press(KeyCode::Char('w')),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(press(KeyCode::Char('x')), None);
    }

    #[test]
    fn digit_and_letter_keys_change_settings() {
        let press = |code| map_key(KeyEvent::new(code, KeyModifiers::NONE));

        assert_eq!(
            press(KeyCode::Char('4')),
            Some(GameInput::Speed(
                SpeedLevel::try_from(4).expect("4 is a valid level")
            ))
        );
        assert_eq!(press(KeyCode::Char('9')), None);
        assert_eq!(
            press(KeyCode::Char('h')),
            Some(GameInput::Difficulty(Difficulty::Hard))
        );
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(GameInput::Quit));
    }
}
