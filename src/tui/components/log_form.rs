//! # Log Form Component
//!
//! Modal overlay for adding or editing a fuel log.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `LogFormState` lives in `TuiState` while the overlay is open
//! - `LogForm` is created each frame with borrowed state
//!
//! Validation runs on Enter. Failing fields show their message under the
//! input and nothing is emitted, so an invalid form never reaches a backend.
//! A valid submit marks the form as saving; it stays open with the typed
//! values until the backend accepts the change.

use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::backend::{FuelLogForm, FuelLogRecord};
use crate::core::currency::Currency;
use crate::core::validation::{Field, FormErrors, FuelLogDraft, VEHICLE_TYPES, validate};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered_rect;
use crate::tui::components::text_field::TextField;
use crate::tui::event::TuiEvent;

const FIELD_HEIGHT: u16 = 4; // bordered input + error line

pub struct LogFormState {
    /// `Some(id)` when editing an existing record.
    pub editing: Option<String>,
    fields: Vec<(Field, TextField)>,
    focus: usize,
    pub errors: FormErrors,
    /// Set once a valid submit was sent; cleared if the backend rejects it.
    pub saving: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormEvent {
    Create(FuelLogForm),
    Update { id: String, form: FuelLogForm },
    Cancel,
}

impl LogFormState {
    pub fn new(today: NaiveDate) -> Self {
        Self::from_draft(None, FuelLogDraft::new(today))
    }

    pub fn edit(record: &FuelLogRecord) -> Self {
        Self::from_draft(Some(record.id.clone()), FuelLogDraft::from_record(record))
    }

    fn from_draft(editing: Option<String>, draft: FuelLogDraft) -> Self {
        let mut fields: Vec<(Field, TextField)> = Field::ALL
            .iter()
            .map(|&f| (f, TextField::with_value(f.label(), draft.field(f))))
            .collect();
        if let Some((_, first)) = fields.first_mut() {
            first.focused = true;
        }
        Self {
            editing,
            fields,
            focus: 0,
            errors: FormErrors::default(),
            saving: false,
        }
    }

    pub fn draft(&self) -> FuelLogDraft {
        let mut draft = FuelLogDraft::default();
        for (field, input) in &self.fields {
            *draft.field_mut(*field) = input.value().to_string();
        }
        draft
    }

    pub fn focused_field(&self) -> Field {
        self.fields[self.focus].0
    }

    fn move_focus(&mut self, forward: bool) {
        self.fields[self.focus].1.focused = false;
        let len = self.fields.len();
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
        self.fields[self.focus].1.focused = true;
    }

    /// Steps the vehicle type through the fixed list.
    fn cycle_vehicle(&mut self, forward: bool) {
        let input = &mut self.fields[self.focus].1;
        let current = VEHICLE_TYPES.iter().position(|v| *v == input.value());
        let len = VEHICLE_TYPES.len();
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        input.set_value(VEHICLE_TYPES[next]);
    }

    /// `liters × price` when both parse.
    pub fn live_total(&self) -> Option<f64> {
        let draft = self.draft();
        let liters = draft.liters.trim().parse::<f64>().ok()?;
        let price = draft.price_per_liter.trim().parse::<f64>().ok()?;
        let total = liters * price;
        total.is_finite().then_some(total)
    }

    /// Handle a key event against `today`. `Create`/`Update` are emitted for
    /// a valid submit, `Cancel` when the overlay should close.
    pub fn handle_event(&mut self, event: &TuiEvent, today: NaiveDate) -> Option<LogFormEvent> {
        match event {
            TuiEvent::Escape => Some(LogFormEvent::Cancel),
            TuiEvent::NextField | TuiEvent::CursorDown => {
                self.move_focus(true);
                None
            }
            TuiEvent::PrevField | TuiEvent::CursorUp => {
                self.move_focus(false);
                None
            }
            TuiEvent::CursorLeft | TuiEvent::CursorRight
                if self.focused_field() == Field::VehicleType =>
            {
                self.cycle_vehicle(matches!(event, TuiEvent::CursorRight));
                None
            }
            TuiEvent::Submit if self.saving => None,
            TuiEvent::Submit => match validate(&self.draft(), today) {
                Ok(form) => Some(match &self.editing {
                    Some(id) => LogFormEvent::Update {
                        id: id.clone(),
                        form,
                    },
                    None => LogFormEvent::Create(form),
                }),
                Err(errors) => {
                    self.errors = errors;
                    None
                }
            },
            other => {
                let focus = self.focus;
                let field = self.fields[focus].0;
                if self.fields[focus].1.handle_event(other).is_some() {
                    // Editing a field clears its stale message.
                    self.errors.errors.retain(|(f, _)| *f != field);
                }
                None
            }
        }
    }
}

pub struct LogForm<'a> {
    state: &'a mut LogFormState,
    currency: Currency,
}

impl<'a> LogForm<'a> {
    pub fn new(state: &'a mut LogFormState, currency: Currency) -> Self {
        Self { state, currency }
    }
}

impl Component for LogForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let height = FIELD_HEIGHT * self.state.fields.len() as u16 + 4;
        let overlay = centered_rect(64, height, area);
        frame.render_widget(Clear, overlay);

        let title = if self.state.editing.is_some() {
            " Edit Fuel Log "
        } else {
            " Add Fuel Log "
        };
        let help = if self.state.saving {
            " Saving... "
        } else {
            " Tab Next  ←/→ Vehicle  Enter Save  Esc Cancel "
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title)
            .title_bottom(Line::from(help).centered());
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let mut constraints = vec![Constraint::Length(FIELD_HEIGHT); self.state.fields.len()];
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(inner);

        for (i, (field, input)) in self.state.fields.iter_mut().enumerate() {
            let [input_area, error_area] =
                Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(rows[i]);
            if *field == Field::VehicleType {
                input.title = format!("{} (←/→)", field.label());
            }
            input.render(frame, input_area);
            if let Some(message) = self.state.errors.get(*field) {
                frame.render_widget(
                    Paragraph::new(message).style(Style::default().fg(Color::Red)),
                    error_area,
                );
            }
        }

        let total = match self.state.live_total() {
            Some(total) => self.currency.format(total),
            None => "-".to_string(),
        };
        let total_line = Line::from(vec![
            Span::raw("Total: "),
            Span::styled(total, Style::default().add_modifier(Modifier::BOLD)),
        ]);
        if let Some(total_area) = rows.last() {
            frame.render_widget(Paragraph::new(total_line), *total_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::POSITIVE_NUMBER;
    use crate::test_support::{record, today};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(state: &mut LogFormState, s: &str) {
        for c in s.chars() {
            state.handle_event(&TuiEvent::InputChar(c), today());
        }
    }

    fn focus(state: &mut LogFormState, field: Field) {
        while state.focused_field() != field {
            state.handle_event(&TuiEvent::NextField, today());
        }
    }

    #[test]
    fn test_new_form_is_dated_today() {
        let state = LogFormState::new(today());
        assert_eq!(state.draft().date, "2025-04-20");
        assert_eq!(state.focused_field(), Field::Date);
    }

    #[test]
    fn test_submit_empty_form_reports_errors() {
        let mut state = LogFormState::new(today());
        assert_eq!(state.handle_event(&TuiEvent::Submit, today()), None);
        assert_eq!(state.errors.get(Field::Liters), Some(POSITIVE_NUMBER));
        assert!(state.errors.get(Field::VehicleType).is_some());
        assert!(state.errors.get(Field::Date).is_none());
    }

    #[test]
    fn test_fill_and_submit_creates() {
        let mut state = LogFormState::new(today());
        focus(&mut state, Field::VehicleType);
        state.handle_event(&TuiEvent::CursorRight, today());
        focus(&mut state, Field::Liters);
        type_str(&mut state, "40");
        focus(&mut state, Field::PricePerLiter);
        type_str(&mut state, "1.5");
        assert_eq!(state.live_total(), Some(60.0));

        match state.handle_event(&TuiEvent::Submit, today()) {
            Some(LogFormEvent::Create(form)) => {
                assert_eq!(form.vehicle_type, "Sedan");
                assert_eq!(form.liters, 40.0);
                assert_eq!(form.notes, None);
            }
            other => panic!("expected Create, got {other:?}"),
        }
    }

    #[test]
    fn test_vehicle_cycles_backwards_and_wraps() {
        let mut state = LogFormState::new(today());
        focus(&mut state, Field::VehicleType);
        state.handle_event(&TuiEvent::CursorLeft, today());
        assert_eq!(state.draft().vehicle_type, "Other");
        state.handle_event(&TuiEvent::CursorRight, today());
        assert_eq!(state.draft().vehicle_type, "Sedan");
    }

    #[test]
    fn test_edit_submits_update_with_id() {
        let rec = record("7", "2025-04-10", 40.0, 1.4, 56.0, "Van");
        let mut state = LogFormState::edit(&rec);
        match state.handle_event(&TuiEvent::Submit, today()) {
            Some(LogFormEvent::Update { id, form }) => {
                assert_eq!(id, "7");
                assert_eq!(form.notes.as_deref(), Some("Regular fill-up"));
            }
            other => panic!("expected Update, got {other:?}"),
        }
    }

    #[test]
    fn test_enter_ignored_while_saving() {
        let rec = record("7", "2025-04-10", 40.0, 1.4, 56.0, "Van");
        let mut state = LogFormState::edit(&rec);
        state.saving = true;
        assert_eq!(state.handle_event(&TuiEvent::Submit, today()), None);
        state.saving = false;
        assert!(state.handle_event(&TuiEvent::Submit, today()).is_some());
    }

    #[test]
    fn test_typing_clears_field_error() {
        let mut state = LogFormState::new(today());
        state.handle_event(&TuiEvent::Submit, today());
        focus(&mut state, Field::Liters);
        type_str(&mut state, "1");
        assert!(state.errors.get(Field::Liters).is_none());
        assert!(state.errors.get(Field::PricePerLiter).is_some());
    }

    #[test]
    fn test_escape_cancels() {
        let mut state = LogFormState::new(today());
        assert_eq!(
            state.handle_event(&TuiEvent::Escape, today()),
            Some(LogFormEvent::Cancel)
        );
    }

    #[test]
    fn test_render_shows_errors_and_total() {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = LogFormState::new(today());
        state.handle_event(&TuiEvent::Submit, today());

        terminal
            .draw(|f| LogForm::new(&mut state, Currency::Usd).render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Add Fuel Log"));
        assert!(text.contains(POSITIVE_NUMBER));
        assert!(text.contains("Total: -"));
    }
}
