//! # Confirm Dialog Component
//!
//! Small yes/no overlay shown before a record is deleted.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::backend::FuelLogRecord;
use crate::core::currency::Currency;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;

/// Pending deletion of one record.
#[derive(Debug, Clone)]
pub struct ConfirmDeleteState {
    pub record: FuelLogRecord,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmEvent {
    Confirm(String),
    Cancel,
}

impl ConfirmDeleteState {
    pub fn new(record: FuelLogRecord) -> Self {
        Self { record }
    }
}

impl EventHandler for ConfirmDeleteState {
    type Event = ConfirmEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar('y') | TuiEvent::InputChar('Y') | TuiEvent::Submit => {
                Some(ConfirmEvent::Confirm(self.record.id.clone()))
            }
            TuiEvent::InputChar('n') | TuiEvent::InputChar('N') | TuiEvent::Escape => {
                Some(ConfirmEvent::Cancel)
            }
            _ => None,
        }
    }
}

pub struct ConfirmDialog<'a> {
    state: &'a ConfirmDeleteState,
    currency: Currency,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(state: &'a ConfirmDeleteState, currency: Currency) -> Self {
        Self { state, currency }
    }
}

impl Component for ConfirmDialog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 7, area);
        frame.render_widget(Clear, overlay);

        let record = &self.state.record;
        let text = vec![
            Line::from("Delete this fuel log?"),
            Line::from(format!(
                "{}  {}  {}",
                record.date,
                record.vehicle_type,
                self.currency.format(record.total_cost)
            ))
            .style(Style::default().fg(Color::Gray)),
            Line::from(""),
            Line::from("y Delete   n Cancel").style(Style::default().fg(Color::DarkGray)),
        ];
        let dialog = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Confirm Delete "),
            );
        frame.render_widget(dialog, overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_yes_confirms_with_id() {
        let mut state = ConfirmDeleteState::new(record("4", "2025-04-01", 1.0, 1.0, 1.0, "Van"));
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('y')),
            Some(ConfirmEvent::Confirm("4".into()))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(ConfirmEvent::Confirm("4".into()))
        );
    }

    #[test]
    fn test_no_and_escape_cancel() {
        let mut state = ConfirmDeleteState::new(record("4", "2025-04-01", 1.0, 1.0, 1.0, "Van"));
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('n')),
            Some(ConfirmEvent::Cancel)
        );
        assert_eq!(state.handle_event(&TuiEvent::Escape), Some(ConfirmEvent::Cancel));
        assert_eq!(state.handle_event(&TuiEvent::InputChar('x')), None);
    }

    #[test]
    fn test_render_names_record() {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let state = ConfirmDeleteState::new(record("4", "2025-04-01", 50.0, 1.32, 66.0, "Van"));
        terminal
            .draw(|f| ConfirmDialog::new(&state, Currency::Usd).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Delete this fuel log?"));
        assert!(text.contains("2025-04-01"));
        assert!(text.contains("$66.00"));
    }
}
