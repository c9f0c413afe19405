//! Core game logic for the treasure-hunting robot
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front-end drives it through [`GameEngine`] and [`GameState`].

pub mod command;
pub mod config;
pub mod engine;
pub mod program;
pub mod replay;
pub mod state;

// Re-export commonly used types
pub use command::{Command, Direction};
pub use config::{ConfigError, GameConfig, StepPolicy};
pub use engine::{GameEngine, StepInfo, TickResult};
pub use program::CommandQueue;
pub use replay::ReplayCursor;
pub use state::{GameState, Position, Robot, TreasureSet};
