pub mod hud;
pub mod renderer;

pub use hud::{Banner, Hud};
pub use renderer::{cell_color, Board, Renderer};
