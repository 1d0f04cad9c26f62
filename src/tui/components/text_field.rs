//! # TextField Component
//!
//! Single-line editable text with a byte-offset cursor. Used by the search
//! bar, the record form and the login screen.
//!
//! The cursor is always kept on a UTF-8 character boundary, so multi-byte
//! input (`€`, `é`) edits cleanly.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Default)]
pub struct TextField {
    buffer: String,
    /// Byte offset into `buffer`.
    pos: usize,
    /// Render `*` instead of the content.
    pub masked: bool,
    pub focused: bool,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextFieldEvent {
    Changed,
    Submit,
}

impl TextField {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_value(title: impl Into<String>, value: &str) -> Self {
        let mut field = Self::new(title);
        field.set_value(value);
        field
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn set_value(&mut self, value: &str) {
        self.buffer = value.to_string();
        self.pos = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.pos = 0;
    }

    fn display_text(&self) -> String {
        if self.masked {
            "*".repeat(self.buffer.chars().count())
        } else {
            self.buffer.clone()
        }
    }

    /// Column of the cursor relative to the start of the text.
    fn cursor_column(&self) -> u16 {
        let before = &self.buffer[..self.pos];
        let width = if self.masked {
            before.chars().count()
        } else {
            before.width()
        };
        width as u16
    }
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_color = if self.focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(self.title.as_str());

        // Keep the cursor visible by scrolling long values horizontally.
        let inner_width = area.width.saturating_sub(2);
        let cursor_col = self.cursor_column();
        let scroll = cursor_col.saturating_sub(inner_width.saturating_sub(1));

        let paragraph = Paragraph::new(self.display_text())
            .block(block)
            .scroll((0, scroll));
        frame.render_widget(paragraph, area);

        if self.focused {
            frame.set_cursor_position((area.x + 1 + cursor_col - scroll, area.y + 1));
        }
    }
}

impl EventHandler for TextField {
    type Event = TextFieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.pos, *c);
                self.pos += c.len_utf8();
                Some(TextFieldEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                // Single line: newlines from the clipboard become spaces.
                let text = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.pos, &text);
                self.pos += text.len();
                Some(TextFieldEvent::Changed)
            }
            TuiEvent::Backspace => {
                if self.pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.pos);
                    self.buffer.drain(prev..self.pos);
                    self.pos = prev;
                    Some(TextFieldEvent::Changed)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.pos);
                    self.buffer.drain(self.pos..next);
                    Some(TextFieldEvent::Changed)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                self.pos = prev_char_boundary(&self.buffer, self.pos);
                None
            }
            TuiEvent::CursorRight => {
                self.pos = next_char_boundary(&self.buffer, self.pos);
                None
            }
            TuiEvent::CursorHome => {
                self.pos = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.pos = self.buffer.len();
                None
            }
            TuiEvent::Submit => Some(TextFieldEvent::Submit),
            _ => None,
        }
    }
}

/// Byte offset of the character boundary before `pos`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
