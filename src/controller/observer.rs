use crate::game::Snapshot;

/// Receives lifecycle and frame notifications from the [`Controller`](super::Controller).
///
/// Everything except `on_frame` has an empty default so displays only
/// implement what they show.
pub trait GameObserver {
    /// A new state is ready to be painted
    fn on_frame(&mut self, snapshot: &Snapshot<'_>);

    fn on_score_changed(&mut self, _score: u32) {}

    fn on_game_started(&mut self) {}

    fn on_game_over(&mut self, _final_score: u32) {}

    /// A fresh game is waiting for its first key press
    fn on_awaiting_start(&mut self) {}
}
