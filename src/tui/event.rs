use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    // Global
    ForceQuit, // Ctrl+C
    Resize,

    // Navigation / confirmation
    Submit,
    Escape,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    NextField,
    PrevField,
    ToggleMode, // Ctrl+T on the login screen

    // Text editing
    InputChar(char),
    Paste(String),
    Backspace,
    Delete,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(Event::Key(key_event)) => map_key(key_event),
        Ok(Event::Paste(data)) => Some(TuiEvent::Paste(data)),
        Ok(Event::Resize(_, _)) => Some(TuiEvent::Resize),
        Ok(_) => None,
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

/// Translate a crossterm key event. Release events are dropped so the
/// keyboard enhancement protocol doesn't double every keystroke.
pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (KeyModifiers::CONTROL, KeyCode::Char('t')) => Some(TuiEvent::ToggleMode),
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::Tab) => Some(TuiEvent::NextField),
        (_, KeyCode::BackTab) => Some(TuiEvent::PrevField),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
        (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
        (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(modifiers: KeyModifiers, code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_ctrl_c_is_force_quit() {
        assert_eq!(
            map_key(key(KeyModifiers::CONTROL, KeyCode::Char('c'))),
            Some(TuiEvent::ForceQuit)
        );
    }

    #[test]
    fn test_plain_chars_are_input() {
        assert_eq!(
            map_key(key(KeyModifiers::NONE, KeyCode::Char('q'))),
            Some(TuiEvent::InputChar('q'))
        );
        assert_eq!(
            map_key(key(KeyModifiers::SHIFT, KeyCode::Char('L'))),
            Some(TuiEvent::InputChar('L'))
        );
    }

    #[test]
    fn test_tab_and_backtab() {
        assert_eq!(
            map_key(key(KeyModifiers::NONE, KeyCode::Tab)),
            Some(TuiEvent::NextField)
        );
        assert_eq!(
            map_key(key(KeyModifiers::SHIFT, KeyCode::BackTab)),
            Some(TuiEvent::PrevField)
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut release = key(KeyModifiers::NONE, KeyCode::Enter);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }
}
