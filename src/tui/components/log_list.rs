//! # Log List Component
//!
//! Table of the visible (filtered + sorted) records.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `LogListState` lives in `TuiState` and remembers the selection
//! - `LogList` is created each frame with borrowed state and records
//!
//! The selection is an index into the visible list, so it is clamped every
//! frame: searching or deleting can shrink the list under it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Cell, Paragraph, Row, Table, TableState};

use crate::backend::FuelLogRecord;
use crate::core::currency::Currency;
use crate::core::view::SortOrder;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

#[derive(Debug, Default)]
pub struct LogListState {
    pub selected: usize,
    pub table_state: TableState,
}

impl LogListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the selection. Returns true if the event was navigation.
    pub fn handle_event(&mut self, event: &TuiEvent, len: usize) -> bool {
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            TuiEvent::CursorDown => {
                if len > 0 {
                    self.selected = (self.selected + 1).min(len - 1);
                }
                true
            }
            TuiEvent::CursorHome => {
                self.selected = 0;
                true
            }
            TuiEvent::CursorEnd => {
                self.selected = len.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
        self.table_state
            .select(if len == 0 { None } else { Some(self.selected) });
    }

    pub fn selected_record<'r>(&self, records: &'r [FuelLogRecord]) -> Option<&'r FuelLogRecord> {
        records.get(self.selected)
    }
}

pub struct LogList<'a> {
    state: &'a mut LogListState,
    records: &'a [FuelLogRecord],
    currency: Currency,
    sort_order: SortOrder,
    total: usize,
}

impl<'a> LogList<'a> {
    /// `total` is the unfiltered collection size, shown in the title.
    pub fn new(
        state: &'a mut LogListState,
        records: &'a [FuelLogRecord],
        currency: Currency,
        sort_order: SortOrder,
        total: usize,
    ) -> Self {
        Self {
            state,
            records,
            currency,
            sort_order,
            total,
        }
    }

    fn row(&self, record: &FuelLogRecord) -> Row<'static> {
        Row::new(vec![
            Cell::from(record.date.clone()),
            Cell::from(record.vehicle_type.clone()),
            Cell::from(format!("{:.2}", record.liters)),
            Cell::from(self.currency.format(record.price_per_liter)),
            Cell::from(self.currency.format(record.total_cost)),
            Cell::from(record.notes.clone().unwrap_or_default()),
        ])
    }
}

impl Component for LogList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.clamp(self.records.len());

        let title = if self.records.len() == self.total {
            format!(" Fuel Logs ({}) ", self.total)
        } else {
            format!(" Fuel Logs ({} of {}) ", self.records.len(), self.total)
        };
        let help = " n New  e Edit  d Delete  / Search  s Sort  x Export  c Currency  r Refresh  q Quit ";
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title(Line::from(format!(" Date {} ", self.sort_order.label())).right_aligned())
            .title_bottom(Line::from(help).centered());

        if self.records.is_empty() {
            let message = if self.total == 0 {
                "No fuel logs yet."
            } else {
                "No fuel logs match your search."
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let header = Row::new(vec!["Date", "Vehicle", "Liters", "Price/L", "Total", "Notes"])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = self.records.iter().map(|r| self.row(r)).collect();
        let widths = [
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Min(10),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(2)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(table, area, &mut self.state.table_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(list: &mut LogList) -> String {
        let backend = TestBackend::new(100, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| list.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut state = LogListState::new();
        assert!(state.handle_event(&TuiEvent::CursorDown, 2));
        assert!(state.handle_event(&TuiEvent::CursorDown, 2));
        assert_eq!(state.selected, 1);
        assert!(state.handle_event(&TuiEvent::CursorUp, 2));
        assert!(state.handle_event(&TuiEvent::CursorUp, 2));
        assert_eq!(state.selected, 0);
        assert!(!state.handle_event(&TuiEvent::InputChar('x'), 2));
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut state = LogListState::new();
        state.selected = 5;
        state.clamp(2);
        assert_eq!(state.selected, 1);
        state.clamp(0);
        assert_eq!(state.selected, 0);
        assert_eq!(state.table_state.selected(), None);
    }

    #[test]
    fn test_renders_rows_with_currency() {
        let records = vec![record("1", "2025-04-18", 45.0, 1.35, 60.75, "Sedan")];
        let mut state = LogListState::new();
        let mut list = LogList::new(&mut state, &records, Currency::Usd, SortOrder::Desc, 1);
        let text = render_text(&mut list);
        assert!(text.contains("Fuel Logs (1)"));
        assert!(text.contains("2025-04-18"));
        assert!(text.contains("$60.75"));
        assert!(text.contains("Regular fill-up"));
    }

    #[test]
    fn test_empty_search_message() {
        let mut state = LogListState::new();
        let mut list = LogList::new(&mut state, &[], Currency::Usd, SortOrder::Desc, 3);
        let text = render_text(&mut list);
        assert!(text.contains("No fuel logs match your search."));
        assert!(text.contains("(0 of 3)"));
    }
}
