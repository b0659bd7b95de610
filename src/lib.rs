//! Grid Snake: a tick-driven game engine plus a local account store that
//! keeps per-player high scores.
//!
//! [`game::GameEngine`] and [`account::AccountStore`] are independent; the
//! host wires them together through [`score::ScoreReporter`].

pub mod account;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod storage;
pub mod terminal_runtime;
pub mod ui;
