use std::io;
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{info, warn};
use snake_arcade::account::{AccountStore, validate_registration};
use snake_arcade::config::{Difficulty, GameSettings, LEADERBOARD_SIZE, SpeedLevel};
use snake_arcade::game::{GameEngine, GameStatus};
use snake_arcade::input::{GameInput, InputHandler};
use snake_arcade::logging::init_file_logger;
use snake_arcade::renderer;
use snake_arcade::score::ScoreReporter;
use snake_arcade::storage::{FileStore, default_data_dir};
use snake_arcade::terminal_runtime::TerminalSession;
use snake_arcade::ui::hud::HudInfo;
use snake_arcade::ui::leaderboard::LeaderboardRow;

const FRAME_POLL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board size and growth preset.
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Speed level from 1 (very slow) to 5 (very fast).
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
    speed: u8,

    /// Directory holding accounts, session and log file.
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Log in as this player before playing.
    #[arg(long, requires = "password")]
    user: Option<String>,

    #[arg(long, requires = "user")]
    password: Option<String>,

    /// Create the account given by --user/--password first.
    #[arg(long, requires = "user")]
    register: bool,

    /// Forget the stored session.
    #[arg(long)]
    logout: bool,

    /// Print the top scores and exit.
    #[arg(long)]
    leaderboard: bool,

    /// Write debug records to the log file.
    #[arg(long)]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);

    if let Err(error) = init_file_logger(&data_dir, cli.verbose) {
        eprintln!("Logging disabled: {error}");
    }
    info!("starting with data dir {}", data_dir.display());

    let mut accounts = AccountStore::new(FileStore::new(&data_dir));
    accounts.load_session();

    if cli.logout {
        accounts.logout();
    }

    if let (Some(username), Some(password)) = (cli.user.as_deref(), cli.password.as_deref()) {
        let username = username.trim();
        if cli.register {
            let registered = validate_registration(username, password)
                .and_then(|()| accounts.register(username, password));
            if let Err(error) = registered {
                exit_with(&format!("Registration failed: {error}"));
            }
        }
        if let Err(error) = accounts.login(username, password) {
            exit_with(&format!("Login failed: {error}"));
        }
    }

    if cli.leaderboard {
        print_leaderboard(&accounts);
        return Ok(());
    }

    let speed = SpeedLevel::try_from(cli.speed)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
    let engine = GameEngine::new(GameSettings {
        speed,
        difficulty: cli.difficulty,
    });

    run(engine, accounts)
}

fn exit_with(message: &str) -> ! {
    eprintln!("{message}");
    process::exit(2);
}

fn print_leaderboard(accounts: &AccountStore<FileStore>) {
    let rows = LeaderboardRow::from_ranked(&accounts.leaderboard(LEADERBOARD_SIZE));
    if rows.is_empty() {
        println!("No scores yet");
        return;
    }

    for row in rows {
        println!("{:>2}. {:<20} {:>6}", row.rank, row.username, row.high_score);
    }
}

/// Host-side state that outlives a single run.
struct App {
    engine: GameEngine,
    accounts: AccountStore<FileStore>,
    reporter: ScoreReporter,
    guest_best: u32,
    best_before_run: u32,
    last_tick: Instant,
}

impl App {
    fn new(engine: GameEngine, accounts: AccountStore<FileStore>) -> Self {
        let mut app = Self {
            engine,
            accounts,
            reporter: ScoreReporter::new(),
            guest_best: 0,
            best_before_run: 0,
            last_tick: Instant::now(),
        };
        app.best_before_run = app.current_best();
        app
    }

    fn current_best(&self) -> u32 {
        self.accounts
            .current_user()
            .map_or(self.guest_best, |user| user.high_score)
    }

    /// Returns false when the player asked to quit.
    fn handle_input(&mut self, input: GameInput) -> bool {
        match input {
            GameInput::Quit => return false,
            GameInput::Confirm => match self.engine.state().status() {
                GameStatus::Ready => {
                    if self.engine.start() {
                        self.last_tick = Instant::now();
                    }
                }
                GameStatus::GameOver => self.new_run(),
                GameStatus::Playing | GameStatus::Paused => {}
            },
            GameInput::Pause => {
                let resumed = self.engine.toggle_pause()
                    && self.engine.state().status() == GameStatus::Playing;
                if resumed {
                    self.last_tick = Instant::now();
                }
            }
            GameInput::Direction(direction) => {
                let _ = self.engine.set_direction(direction);
            }
            GameInput::Speed(speed) => self.engine.set_speed(speed),
            GameInput::Difficulty(difficulty) => {
                self.engine.set_difficulty(difficulty);
                // Nothing to abandon yet, so apply the new board right away.
                if self.engine.state().status() == GameStatus::Ready {
                    self.engine.reset(difficulty);
                }
            }
        }
        true
    }

    fn new_run(&mut self) {
        self.guest_best = self.guest_best.max(self.engine.state().score());
        self.engine.reset_with_current_settings();
        self.reporter.reset();
        self.best_before_run = self.current_best();
    }

    fn advance(&mut self) {
        if self.engine.state().status() == GameStatus::Playing
            && self.last_tick.elapsed() >= self.engine.tick_interval()
        {
            self.engine.tick();
            self.last_tick = Instant::now();
        }

        let user_id = self.accounts.current_user().map(|user| user.id.clone());
        let state = self.engine.state();
        if let Some(score) = self.reporter.observe(state, user_id.as_deref(), &mut self.accounts) {
            info!("submitted final score {score}");
        }
    }
}

fn run(engine: GameEngine, accounts: AccountStore<FileStore>) -> io::Result<()> {
    let mut terminal = TerminalSession::enter()?;
    let mut input = InputHandler;
    let mut app = App::new(engine, accounts);

    loop {
        let rows = LeaderboardRow::from_ranked(&app.accounts.leaderboard(LEADERBOARD_SIZE));
        let state = app.engine.state();
        let settings = state.settings();
        let hud = HudInfo {
            username: app
                .accounts
                .current_user()
                .map(|user| user.username.as_str()),
            best_before_run: app.best_before_run,
            pending_difficulty: (settings.difficulty != state.active_difficulty())
                .then_some(settings.difficulty),
        };
        terminal
            .terminal_mut()
            .draw(|frame| renderer::render(frame, state, &hud, &rows))?;

        match input.poll_input(FRAME_POLL) {
            Ok(Some(game_input)) => {
                if !app.handle_input(game_input) {
                    break;
                }
            }
            Ok(None) => {}
            Err(error) => warn!("input poll failed: {error}"),
        }

        app.advance();
    }

    info!("quitting");
    Ok(())
}
