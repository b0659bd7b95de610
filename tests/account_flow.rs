use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use snake_arcade::account::{AccountStore, User};
use snake_arcade::config::{GameSettings, USERS_KEY};
use snake_arcade::error::{LoginError, RegisterError};
use snake_arcade::game::{GameEngine, GameStatus};
use snake_arcade::score::ScoreReporter;
use snake_arcade::snake::Position;
use snake_arcade::storage::{FileStore, KeyValueStore, load_json};

fn unique_test_dir(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be after epoch")
        .as_nanos();

    std::env::temp_dir()
        .join("snake-arcade-account-tests")
        .join(format!("{label}-{nanos}"))
}

fn open_store(dir: &Path) -> AccountStore<FileStore> {
    let mut accounts = AccountStore::new(FileStore::new(dir));
    accounts.load_session();
    accounts
}

fn cleanup(dir: &Path) {
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn first_run_writes_seed_users_to_disk() {
    let dir = unique_test_dir("seed");
    let accounts = open_store(&dir);
    assert_eq!(accounts.users().len(), 3);

    let raw = fs::read_to_string(dir.join(format!("{USERS_KEY}.json")))
        .expect("users file should exist");
    assert!(raw.contains("\"highScore\""));
    assert!(raw.contains("\"createdAt\""));
    assert!(!raw.contains("\"password\""));

    cleanup(&dir);
}

#[test]
fn register_login_and_restart_keep_the_session() {
    let dir = unique_test_dir("restart");
    let mut accounts = open_store(&dir);

    let user = accounts
        .register("Ferris", "crab_rave")
        .expect("fresh username should register");
    assert_eq!(
        accounts.register("ferris", "different"),
        Err(RegisterError::UsernameTaken)
    );
    accounts
        .login("FERRIS", "crab_rave")
        .expect("login should ignore username case");
    drop(accounts);

    let reopened = open_store(&dir);
    let current = reopened.current_user().expect("session should survive restart");
    assert_eq!(current.id, user.id);
    assert_eq!(current.username, "Ferris");

    cleanup(&dir);
}

#[test]
fn bad_credentials_do_not_start_a_session() {
    let dir = unique_test_dir("bad-login");
    let mut accounts = open_store(&dir);

    assert_eq!(
        accounts.login("demo", "wrong"),
        Err(LoginError::InvalidCredentials)
    );
    assert!(accounts.current_user().is_none());
    drop(accounts);

    assert!(open_store(&dir).current_user().is_none());
    cleanup(&dir);
}

#[test]
fn corrupt_users_file_falls_back_to_seed() {
    let dir = unique_test_dir("corrupt");
    let mut raw_store = FileStore::new(&dir);
    raw_store
        .set(USERS_KEY, "[{\"id\": 1")
        .expect("raw write should succeed");

    let mut accounts = AccountStore::new(FileStore::new(&dir));
    accounts.load_session();

    assert_eq!(accounts.users().len(), 3);
    assert!(accounts.login("demo", "password").is_ok());

    cleanup(&dir);
}

#[test]
fn finished_run_updates_high_score_once() {
    let dir = unique_test_dir("run");
    let mut accounts = open_store(&dir);
    let user = accounts.register("runner", "secret1").expect("register");
    accounts.login("runner", "secret1").expect("login");

    let mut engine = GameEngine::with_seed(GameSettings::default(), 1);
    engine
        .place_food(Position::new(6, 10))
        .expect("cell ahead of the head is free");
    let mut reporter = ScoreReporter::new();
    assert!(engine.start());

    let user_id = user.id.clone();
    for _ in 0..40 {
        engine.tick();
        reporter.observe(engine.state(), Some(&user_id), &mut accounts);
        if engine.state().status() == GameStatus::GameOver {
            break;
        }
    }
    assert_eq!(engine.state().status(), GameStatus::GameOver);
    let final_score = engine.state().score();
    assert!(final_score >= 10);

    assert_eq!(
        reporter.observe(engine.state(), Some(&user_id), &mut accounts),
        None
    );
    assert_eq!(
        accounts.current_user().map(|u| u.high_score),
        Some(final_score)
    );

    // A worse later run leaves the stored best alone.
    engine.reset_with_current_settings();
    reporter.reset();
    assert!(!accounts.record_score(&user_id, 0));

    let persisted: Vec<User> = load_json(&FileStore::new(&dir), USERS_KEY)
        .expect("users file should parse")
        .expect("users file should exist");
    let stored = persisted
        .iter()
        .find(|u| u.id == user_id)
        .expect("runner should be persisted");
    assert_eq!(stored.high_score, final_score);

    cleanup(&dir);
}
