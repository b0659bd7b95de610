use rand::Rng;

use crate::config::FOOD_SAMPLE_ATTEMPTS;
use crate::snake::{Position, Snake};

/// Picks a cell for new food that the snake does not occupy.
///
/// Draws uniformly from the whole board and rejects occupied cells. After
/// [`FOOD_SAMPLE_ATTEMPTS`] misses it falls back to choosing among the free
/// cells directly, so a nearly full board still terminates. Returns `None`
/// when the snake covers every cell.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    board_size: u16,
    snake: &Snake,
) -> Option<Position> {
    let size = i32::from(board_size);
    if size == 0 {
        return None;
    }

    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let candidate = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    let free: Vec<Position> = (0..size)
        .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
        .filter(|position| !snake.occupies(*position))
        .collect();

    if free.is_empty() {
        return None;
    }

    Some(free[rng.gen_range(0..free.len())])
}
