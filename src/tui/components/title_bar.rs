//! # TitleBar Component
//!
//! Top status bar: app name, greeting, status message and a spinner while a
//! backend call is in flight.
//!
//! TitleBar is purely presentational. It receives all data as props and
//! has no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.greeting(), app.status_message.clone(), true, frame);
//! title_bar.render(frame, area);
//! ```
//!
//! The text collapses by priority so the status is visible on narrow
//! terminals:
//!
//! 1. **Busy**: `"Fuelog | Welcome back, Demo User! | Saving... ⠙"`
//! 2. **Status**: `"Fuelog | Welcome back, Demo User! | Loaded 3 fuel logs"`
//! 3. **Default**: `"Fuelog | Welcome back, Demo User!"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct TitleBar {
    pub greeting: String,
    pub status_message: String,
    pub is_busy: bool,
    pub spinner_frame: usize,
}

impl TitleBar {
    pub fn new(
        greeting: String,
        status_message: String,
        is_busy: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            greeting,
            status_message,
            is_busy,
            spinner_frame,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                "Fuelog",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" | {}", self.greeting)),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::styled(
                format!(" | {}", self.status_message),
                Style::default().fg(Color::Gray),
            ));
        }
        if self.is_busy {
            let glyph = SPINNER[self.spinner_frame % SPINNER.len()];
            spans.push(Span::styled(
                format!(" {glyph}"),
                Style::default().fg(Color::Cyan),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
