use crate::controller::GameObserver;
use crate::game::Snapshot;
use crate::metrics::GameMetrics;

/// Which overlay the board shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    PressAnyKey,
    Playing,
    GameOver { final_score: u32 },
}

/// Everything on screen that is not the board itself.
///
/// Fed by controller notifications; `dirty` tells the loop a redraw is due.
pub struct Hud {
    pub banner: Banner,
    pub score: u32,
    pub metrics: GameMetrics,
    dirty: bool,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            banner: Banner::PressAnyKey,
            score: 0,
            metrics: GameMetrics::new(),
            dirty: true,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a redraw was requested and clears the request
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl GameObserver for Hud {
    fn on_frame(&mut self, _snapshot: &Snapshot<'_>) {
        self.dirty = true;
    }

    fn on_score_changed(&mut self, score: u32) {
        self.score = score;
        self.dirty = true;
    }

    fn on_game_started(&mut self) {
        self.banner = Banner::Playing;
        self.metrics.on_game_start();
        self.dirty = true;
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.banner = Banner::GameOver { final_score };
        self.metrics.on_game_over(final_score);
        self.dirty = true;
    }

    fn on_awaiting_start(&mut self) {
        self.banner = Banner::PressAnyKey;
        self.metrics.on_reset();
        self.dirty = true;
    }
}
