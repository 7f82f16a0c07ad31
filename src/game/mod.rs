//! Core game logic module for Snake
//!
//! This module contains all the game rules without any I/O or rendering dependencies.
//! The grid wraps on both axes, so the only way to die is to run into yourself.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Axis, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepOutcome};
pub use state::{GameState, Phase, Position, Snake, Snapshot};
