use log::info;

use crate::account::AccountStore;
use crate::game::{GameState, GameStatus};
use crate::storage::KeyValueStore;

/// Forwards a finished run's score to the account store exactly once.
///
/// The engine never talks to the account store itself; the host calls
/// [`observe`](Self::observe) after every tick and [`reset`](Self::reset)
/// whenever it resets the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreReporter {
    reported: bool,
}

impl ScoreReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits the final score the first time `state` is observed as over.
    ///
    /// Returns the submitted score. Guest runs (`user_id` is `None`) are
    /// marked as reported without touching the store.
    pub fn observe<S: KeyValueStore>(
        &mut self,
        state: &GameState,
        user_id: Option<&str>,
        accounts: &mut AccountStore<S>,
    ) -> Option<u32> {
        if self.reported || state.status() != GameStatus::GameOver {
            return None;
        }
        self.reported = true;

        let user_id = user_id?;
        let score = state.score();
        if accounts.record_score(user_id, score) {
            info!("run finished with new best {score}");
        }
        Some(score)
    }

    /// Arms the reporter for the next run.
    pub fn reset(&mut self) {
        self.reported = false;
    }

    #[must_use]
    pub fn has_reported(&self) -> bool {
        self.reported
    }
}

#[cfg(test)]
mod tests {
    use super::ScoreReporter;
    use crate::account::AccountStore;
    use crate::config::GameSettings;
    use crate::game::GameEngine;
    use crate::storage::MemoryStore;

    fn accounts() -> AccountStore<MemoryStore> {
        let mut accounts = AccountStore::new(MemoryStore::new());
        accounts.load_session();
        accounts
    }

    fn finished_engine() -> GameEngine {
        let mut engine = GameEngine::with_seed(GameSettings::default(), 21);
        assert!(engine.start());
        // Heading right from (5, 10) hits the wall within 15 ticks.
        for _ in 0..20 {
            engine.tick();
        }
        engine
    }

    #[test]
    fn nothing_is_reported_while_running() {
        let mut accounts = accounts();
        let mut engine = GameEngine::with_seed(GameSettings::default(), 22);
        assert!(engine.start());
        engine.tick();

        let mut reporter = ScoreReporter::new();

        assert_eq!(reporter.observe(engine.state(), Some("demo-1"), &mut accounts), None);
        assert!(!reporter.has_reported());
    }

    #[test]
    fn finished_run_is_reported_once() {
        let mut accounts = accounts();
        let engine = finished_engine();
        let mut reporter = ScoreReporter::new();

        let first = reporter.observe(engine.state(), Some("demo-1"), &mut accounts);
        let second = reporter.observe(engine.state(), Some("demo-1"), &mut accounts);

        assert_eq!(first, Some(engine.state().score()));
        assert_eq!(second, None);

        reporter.reset();
        assert!(!reporter.has_reported());
    }

    #[test]
    fn guest_runs_are_not_submitted() {
        let mut accounts = accounts();
        let before = accounts.users().to_vec();
        let engine = finished_engine();
        let mut reporter = ScoreReporter::new();

        assert_eq!(reporter.observe(engine.state(), None, &mut accounts), None);
        assert!(reporter.has_reported());
        assert_eq!(accounts.users(), before.as_slice());
    }
}
