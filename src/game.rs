use std::time::Duration;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{Difficulty, GameSettings, SpeedLevel, FOOD_REWARD, INITIAL_SNAKE_LENGTH};
use crate::error::LayoutError;
use crate::food::spawn_position;
use crate::input::{Direction, direction_change_is_valid};
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Ready,
    Playing,
    Paused,
    GameOver,
}

/// Why the last run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverReason {
    WallCollision,
    SelfCollision,
    /// The snake covers the whole board and no food can be placed.
    BoardFilled,
}

/// Read-only snapshot of one run.
#[derive(Debug, Clone)]
pub struct GameState {
    snake: Snake,
    food: Position,
    direction: Direction,
    pending_direction: Option<Direction>,
    score: u32,
    status: GameStatus,
    settings: GameSettings,
    active_difficulty: Difficulty,
    board_size: u16,
    pending_growth: u32,
    game_over_reason: Option<GameOverReason>,
    tick_count: u64,
}

impl GameState {
    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Position {
        self.food
    }

    /// Heading applied on the most recent tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Heading queued for the next tick.
    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    /// Difficulty the current run was reset with.
    ///
    /// Differs from `settings().difficulty` when a change is waiting for the
    /// next reset.
    #[must_use]
    pub fn active_difficulty(&self) -> Difficulty {
        self.active_difficulty
    }

    /// Side length of the board the current snake lives on.
    #[must_use]
    pub fn board_size(&self) -> u16 {
        self.board_size
    }

    #[must_use]
    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

/// Owns the game state and the step function that advances it.
#[derive(Debug, Clone)]
pub struct GameEngine {
    state: GameState,
    rng: StdRng,
}

impl GameEngine {
    /// Creates an engine seeded from OS entropy, already reset to `Ready`.
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Creates a deterministic engine for tests and reproducible simulations.
    #[must_use]
    pub fn with_seed(settings: GameSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: GameSettings, mut rng: StdRng) -> Self {
        let board_size = settings.difficulty.board_size();
        let snake = initial_snake(board_size);
        let food = initial_food(&mut rng, board_size, &snake);

        Self {
            state: GameState {
                snake,
                food,
                direction: Direction::Right,
                pending_direction: None,
                score: 0,
                status: GameStatus::Ready,
                settings,
                active_difficulty: settings.difficulty,
                board_size,
                pending_growth: 0,
                game_over_reason: None,
                tick_count: 0,
            },
            rng,
        }
    }

    /// Read-only view of the current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state for render collaborators.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Discards the current run and reseeds the board for `difficulty`.
    pub fn reset(&mut self, difficulty: Difficulty) -> &GameState {
        self.state.settings.difficulty = difficulty;

        let board_size = difficulty.board_size();
        let snake = initial_snake(board_size);
        let food = initial_food(&mut self.rng, board_size, &snake);

        self.state.active_difficulty = difficulty;
        self.state.snake = snake;
        self.state.food = food;
        self.state.board_size = board_size;
        self.state.direction = Direction::Right;
        self.state.pending_direction = None;
        self.state.score = 0;
        self.state.pending_growth = 0;
        self.state.game_over_reason = None;
        self.state.tick_count = 0;
        self.set_status(GameStatus::Ready);

        &self.state
    }

    /// Resets using the difficulty currently stored in the settings.
    pub fn reset_with_current_settings(&mut self) -> &GameState {
        let difficulty = self.state.settings.difficulty;
        self.reset(difficulty)
    }

    /// Moves from `Ready` to `Playing`. Returns false from any other status.
    pub fn start(&mut self) -> bool {
        if self.state.status != GameStatus::Ready {
            return false;
        }

        self.set_status(GameStatus::Playing);
        true
    }

    /// Suspends a running game. Returns false unless status was `Playing`.
    pub fn pause(&mut self) -> bool {
        if self.state.status != GameStatus::Playing {
            return false;
        }

        self.set_status(GameStatus::Paused);
        true
    }

    /// Continues a paused game. Returns false unless status was `Paused`.
    pub fn resume(&mut self) -> bool {
        if self.state.status != GameStatus::Paused {
            return false;
        }

        self.set_status(GameStatus::Playing);
        true
    }

    /// Flips between `Playing` and `Paused`; other statuses are untouched.
    pub fn toggle_pause(&mut self) -> bool {
        match self.state.status {
            GameStatus::Playing => self.pause(),
            GameStatus::Paused => self.resume(),
            GameStatus::Ready | GameStatus::GameOver => false,
        }
    }

    /// Requests a new heading for the next tick.
    ///
    /// Ignored unless playing. A request for the reverse of the heading
    /// applied on the last tick is dropped, which also covers quick
    /// double-turns within a single tick. The last accepted request wins.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.state.status != GameStatus::Playing {
            return false;
        }

        if !direction_change_is_valid(self.state.direction, direction) {
            return false;
        }

        self.state.pending_direction = Some(direction);
        true
    }

    /// Stores a new speed level. The host picks it up on its next interval.
    pub fn set_speed(&mut self, speed: SpeedLevel) {
        self.state.settings.speed = speed;
    }

    /// Stores a new difficulty. Takes effect on the next [`reset`](Self::reset).
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.state.settings.difficulty = difficulty;
    }

    /// Interval the timer collaborator should wait between ticks.
    ///
    /// Uses the stored speed and the difficulty of the running board.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        GameSettings {
            speed: self.state.settings.speed,
            difficulty: self.state.active_difficulty,
        }
        .tick_interval()
    }

    /// Moves the food to `position` before a run starts.
    pub fn place_food(&mut self, position: Position) -> Result<(), LayoutError> {
        if self.state.status != GameStatus::Ready {
            return Err(LayoutError::NotReady);
        }
        if !position.is_within_bounds(self.state.board_size) {
            return Err(LayoutError::OutOfBounds(position));
        }
        if self.state.snake.occupies(position) {
            return Err(LayoutError::OnSnake(position));
        }

        self.state.food = position;
        Ok(())
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) {
        if self.state.status != GameStatus::Playing {
            return;
        }

        self.state.tick_count += 1;
        if let Some(next) = self.state.pending_direction.take() {
            self.state.direction = next;
        }

        let next_head = self.state.snake.head().step(self.state.direction);
        if !next_head.is_within_bounds(self.state.board_size) {
            self.finish(GameOverReason::WallCollision);
            return;
        }

        let eats = next_head == self.state.food;
        let keeps_tail = eats || self.state.pending_growth > 0;
        let collides = if keeps_tail {
            self.state.snake.occupies(next_head)
        } else {
            self.state.snake.occupies_excluding_tail(next_head)
        };
        if collides {
            self.finish(GameOverReason::SelfCollision);
            return;
        }

        if eats {
            self.state.snake.advance(next_head, true);
            self.state.score += FOOD_REWARD;
            self.state.pending_growth += self.state.active_difficulty.growth_rate() - 1;

            match spawn_position(&mut self.rng, self.state.board_size, &self.state.snake) {
                Some(food) => self.state.food = food,
                None => self.finish(GameOverReason::BoardFilled),
            }
            return;
        }

        let grow = self.state.pending_growth > 0;
        if grow {
            self.state.pending_growth -= 1;
        }
        self.state.snake.advance(next_head, grow);
    }

    fn finish(&mut self, reason: GameOverReason) {
        self.state.game_over_reason = Some(reason);
        debug!(
            "run ended: {reason:?} with score {} after {} ticks",
            self.state.score, self.state.tick_count
        );
        self.set_status(GameStatus::GameOver);
    }

    fn set_status(&mut self, status: GameStatus) {
        if self.state.status != status {
            debug!("game status {:?} -> {status:?}", self.state.status);
        }
        self.state.status = status;
    }
}

/// Snake for a fresh run: head a quarter across, vertically centered, heading right.
fn initial_snake(board_size: u16) -> Snake {
    let head = Position::new(i32::from(board_size / 4), i32::from(board_size / 2));
    Snake::straight(head, Direction::Right, INITIAL_SNAKE_LENGTH)
}

fn initial_food(rng: &mut StdRng, board_size: u16, snake: &Snake) -> Position {
    // A three-cell snake never fills a preset board.
    spawn_position(rng, board_size, snake).unwrap_or(Position::new(0, 0))
}
