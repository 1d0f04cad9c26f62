//! # Currency Picker Component
//!
//! Overlay for choosing the display currency. Opened with `c`.
//! Only the symbol changes; amounts are never converted.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CurrencyPickerState` lives in `TuiState`
//! - `CurrencyPicker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};

use crate::core::currency::Currency;
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;

/// Persistent state for the currency picker overlay.
pub struct CurrencyPickerState {
    pub selected: usize,
    pub list_state: ListState,
}

impl CurrencyPickerState {
    /// Opens with `current` highlighted.
    pub fn new(current: Currency) -> Self {
        let selected = Currency::ALL
            .iter()
            .position(|c| *c == current)
            .unwrap_or(0);
        let mut list_state = ListState::default();
        list_state.select(Some(selected));
        Self {
            selected,
            list_state,
        }
    }

    /// Handle a key event, returning a CurrencyPickerEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<CurrencyPickerEvent> {
        match event {
            TuiEvent::Escape => Some(CurrencyPickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(Currency::ALL.len() - 1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit => Currency::ALL
                .get(self.selected)
                .map(|c| CurrencyPickerEvent::Select(*c)),
            _ => None,
        }
    }
}

/// Events emitted by the currency picker.
#[derive(Debug, PartialEq)]
pub enum CurrencyPickerEvent {
    Select(Currency),
    Dismiss,
}

/// Transient render wrapper for the currency picker overlay.
pub struct CurrencyPicker<'a> {
    state: &'a mut CurrencyPickerState,
    current: Currency,
}

impl<'a> CurrencyPicker<'a> {
    pub fn new(state: &'a mut CurrencyPickerState, current: Currency) -> Self {
        Self { state, current }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(30, Currency::ALL.len() as u16 + 2, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Currency ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = Currency::ALL
            .iter()
            .enumerate()
            .map(|(i, currency)| {
                let is_active = *currency == self.current;
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if is_active {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let marker = if is_active { " *" } else { "" };
                ListItem::new(Line::from(Span::styled(
                    format!("{}{marker}", currency.label()),
                    style,
                )))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}
