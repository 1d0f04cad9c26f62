//! # Login Screen
//!
//! Shown in place of the dashboard while nobody is signed in. Ctrl+T
//! switches between signing in and creating an account.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered_rect;
use crate::tui::components::text_field::TextField;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    SignIn,
    Register,
}

pub struct LoginState {
    pub mode: LoginMode,
    name: TextField,
    email: TextField,
    password: TextField,
    focus: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginEvent {
    SignIn {
        email: String,
        password: String,
    },
    Register {
        name: String,
        email: String,
        password: String,
    },
}

impl Default for LoginState {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginState {
    pub fn new() -> Self {
        let mut state = Self {
            mode: LoginMode::SignIn,
            name: TextField::new("Name"),
            email: TextField::new("Email"),
            password: TextField::new("Password").masked(),
            focus: 0,
            error: None,
        };
        state.sync_focus();
        state
    }

    /// Inputs visible in the current mode, top to bottom.
    fn visible_fields(&mut self) -> Vec<&mut TextField> {
        match self.mode {
            LoginMode::SignIn => vec![&mut self.email, &mut self.password],
            LoginMode::Register => vec![&mut self.name, &mut self.email, &mut self.password],
        }
    }

    fn sync_focus(&mut self) {
        let focus = self.focus;
        self.name.focused = false;
        self.email.focused = false;
        self.password.focused = false;
        if let Some(field) = self.visible_fields().into_iter().nth(focus) {
            field.focused = true;
        }
    }

    fn field_count(&self) -> usize {
        match self.mode {
            LoginMode::SignIn => 2,
            LoginMode::Register => 3,
        }
    }

    fn submit(&mut self) -> Option<LoginEvent> {
        let name = self.name.value().trim().to_string();
        let email = self.email.value().trim().to_string();
        let password = self.password.value().to_string();

        let missing = email.is_empty()
            || password.is_empty()
            || (self.mode == LoginMode::Register && name.is_empty());
        if missing {
            self.error = Some("Please fill in all fields".to_string());
            return None;
        }
        if !email.contains('@') {
            self.error = Some("Please enter a valid email address".to_string());
            return None;
        }
        self.error = None;
        Some(match self.mode {
            LoginMode::SignIn => LoginEvent::SignIn { email, password },
            LoginMode::Register => LoginEvent::Register {
                name,
                email,
                password,
            },
        })
    }

    /// Forget the typed password, e.g. after a failed attempt.
    pub fn clear_password(&mut self) {
        self.password.clear();
    }
}

impl EventHandler for LoginState {
    type Event = LoginEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ToggleMode => {
                self.mode = match self.mode {
                    LoginMode::SignIn => LoginMode::Register,
                    LoginMode::Register => LoginMode::SignIn,
                };
                self.focus = 0;
                self.error = None;
                self.sync_focus();
                None
            }
            TuiEvent::NextField | TuiEvent::CursorDown => {
                self.focus = (self.focus + 1) % self.field_count();
                self.sync_focus();
                None
            }
            TuiEvent::PrevField | TuiEvent::CursorUp => {
                let count = self.field_count();
                self.focus = (self.focus + count - 1) % count;
                self.sync_focus();
                None
            }
            TuiEvent::Submit => self.submit(),
            other => {
                let focus = self.focus;
                if let Some(field) = self.visible_fields().into_iter().nth(focus) {
                    field.handle_event(other);
                }
                None
            }
        }
    }
}

pub struct LoginScreen<'a> {
    state: &'a mut LoginState,
    is_loading: bool,
    /// Extra line under the form, e.g. the demo credentials hint.
    hint: Option<&'a str>,
}

impl<'a> LoginScreen<'a> {
    pub fn new(state: &'a mut LoginState, is_loading: bool, hint: Option<&'a str>) -> Self {
        Self {
            state,
            is_loading,
            hint,
        }
    }
}

impl Component for LoginScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let field_count = self.state.field_count() as u16;
        let overlay = centered_rect(50, field_count * 3 + 6, area);

        let (title, help) = match self.state.mode {
            LoginMode::SignIn => (" Sign In ", " Enter Sign in  Ctrl+T Register  Ctrl+C Quit "),
            LoginMode::Register => (
                " Create Account ",
                " Enter Register  Ctrl+T Sign in  Ctrl+C Quit ",
            ),
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow))
            .title(Line::from(title).style(Style::default().add_modifier(Modifier::BOLD)))
            .title_bottom(Line::from(help).centered());
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let mut constraints = vec![Constraint::Length(3); field_count as usize];
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(inner);

        for (field, row) in self.state.visible_fields().into_iter().zip(rows.iter()) {
            field.render(frame, *row);
        }

        let status = if self.is_loading {
            Paragraph::new("Please wait...").style(Style::default().fg(Color::Cyan))
        } else if let Some(error) = &self.state.error {
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red))
        } else {
            Paragraph::new("")
        };
        let n = field_count as usize;
        frame.render_widget(status.alignment(Alignment::Center), rows[n]);
        if let Some(hint) = self.hint {
            frame.render_widget(
                Paragraph::new(hint)
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center),
                rows[n + 1],
            );
        }
    }
}
