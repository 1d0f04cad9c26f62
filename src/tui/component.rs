//! Traits shared by the dashboard widgets.
//!
//! Screens pair a persistent `*State` (kept in `TuiState` between frames)
//! with a short-lived wrapper built each frame from borrowed state and `App`
//! data. The wrapper implements `Component`; the state implements
//! `EventHandler` when the screen takes keyboard input.

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Draws itself into `area`. Takes `&mut self` so a render can sync
/// selection or scroll offsets, e.g. `LogList` clamping its `TableState`.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Turns key presses into the screen's own outcome, such as
/// `ConfirmEvent::Confirm(id)` or `LoginEvent::SignIn { .. }`. `None` means
/// the key was consumed (or ignored) without an outcome.
pub trait EventHandler {
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
