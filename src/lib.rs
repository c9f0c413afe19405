//! Robot Treasure - program a robot, then watch it hunt for treasure
//!
//! This library provides:
//! - Core game logic: robot motion, treasures, the command queue and its timed replay (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Per-session statistics (metrics module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
