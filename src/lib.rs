//! Torus Snake - Snake on a grid that wraps around at every edge
//!
//! This library provides:
//! - Core game rules (game module)
//! - Input buffering and the tick schedule (controller module)
//! - Key mapping (input module)
//! - TUI rendering (render module)
//! - Session stats (metrics module)
//! - The interactive terminal mode (modes module)

pub mod controller;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
