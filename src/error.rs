use std::io;

use thiserror::Error;

use crate::snake::Position;

/// Failure reading or writing the key-value medium.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("stored payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejected registration attempt.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum RegisterError {
    #[error("username is already taken")]
    UsernameTaken,
    #[error("username must be 3-20 letters, digits or underscores")]
    InvalidUsername,
    #[error("password must be at least 6 characters")]
    CredentialTooShort,
}

/// Rejected login attempt.
///
/// Unknown usernames and wrong passwords are deliberately indistinguishable.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum LoginError {
    #[error("invalid username or password")]
    InvalidCredentials,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SettingsError {
    #[error("speed level {0} is outside 1..=5")]
    SpeedOutOfRange(u8),
}

/// Rejected scripted board layout.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum LayoutError {
    #[error("layout can only change before the run starts")]
    NotReady,
    #[error("position ({}, {}) is outside the board", .0.x, .0.y)]
    OutOfBounds(Position),
    #[error("position ({}, {}) is occupied by the snake", .0.x, .0.y)]
    OnSnake(Position),
}
