//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Effects
//!
//! `update()` never does I/O. When it returns an `Effect`, this module runs
//! the backend call on a tokio task and sends the result back as an `Action`
//! over an mpsc channel. The loop drains that channel between frames, so all
//! state changes still happen on this thread.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (fetch, mutation or sign-in in flight): draws every ~80ms so the
//!   spinner moves.
//! - **Idle**: sleeps up to 250ms, only redraws on input or background results.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::future::Future;
use std::io::stdout;
use std::sync::mpsc;

use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::export::write_export;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ConfirmDeleteState, ConfirmEvent, CurrencyPickerEvent, CurrencyPickerState, LogFormEvent,
    LogFormState, LogListState, LoginEvent, LoginState, TextField, TextFieldEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which part of the dashboard receives keys when no overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Search,
}

/// Modal overlays. At most one is open.
pub enum Overlay {
    Form(LogFormState),
    ConfirmDelete(ConfirmDeleteState),
    Currency(CurrencyPickerState),
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub log_list: LogListState,
    pub search: TextField,
    pub focus: Focus,
    pub overlay: Option<Overlay>,
    pub login: LoginState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            log_list: LogListState::new(),
            search: TextField::new("Search (vehicle, notes, date)"),
            focus: Focus::List,
            overlay: None,
            login: LoginState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Release events are filtered in event::map_key; terminals without
        // the protocol ignore the flags.
        execute!(
            stdout(),
            EnableBracketedPaste,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, DisableBracketedPaste);
    }
}

pub fn run(mut app: App) -> std::io::Result<()> {
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    if app.session.is_authenticated() {
        dispatch(&mut app, &mut tui, Action::Refresh, &tx);
    }

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let busy = app.store.is_loading() || app.pending_mutation || app.session.is_loading;
        if busy {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if busy {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = handle_event(&app, &mut tui, event)
                && dispatch(&mut app, &mut tui, action, &tx)
            {
                should_quit = true;
                break;
            }
        }
        if should_quit {
            break;
        }

        // Results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, &mut tui, action, &tx) {
                should_quit = true;
            }
        }
        if should_quit {
            break;
        }
    }

    // In-flight tasks will find the receiver gone and log it.
    app.session.teardown();
    info!("Fuelog shutting down");

    ratatui::restore();
    Ok(())
}

/// Translate a terminal event into an Action, updating presentation state
/// along the way. Returns None for events handled entirely in the TUI.
fn handle_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        _ => {}
    }

    if !app.session.is_authenticated() {
        if app.session.is_loading {
            return None;
        }
        return tui.login.handle_event(&event).map(|login| match login {
            LoginEvent::SignIn { email, password } => Action::Login { email, password },
            LoginEvent::Register {
                name,
                email,
                password,
            } => Action::Register {
                name,
                email,
                password,
            },
        });
    }

    if let Some(overlay) = tui.overlay.as_mut() {
        let (action, close) = handle_overlay_event(app, overlay, &event);
        if close {
            tui.overlay = None;
        }
        return action;
    }

    match tui.focus {
        Focus::Search => match event {
            TuiEvent::Escape | TuiEvent::Submit => {
                tui.focus = Focus::List;
                None
            }
            other => match tui.search.handle_event(&other) {
                Some(TextFieldEvent::Changed) => {
                    Some(Action::SetSearch(tui.search.value().to_string()))
                }
                _ => None,
            },
        },
        Focus::List => handle_list_event(app, tui, event),
    }
}

/// Returns the Action to dispatch and whether the overlay should close.
fn handle_overlay_event(app: &App, overlay: &mut Overlay, event: &TuiEvent) -> (Option<Action>, bool) {
    match overlay {
        // The form stays open until the backend accepts the change.
        Overlay::Form(state) => match state.handle_event(event, app.clock.today()) {
            Some(LogFormEvent::Create(form)) => {
                state.saving = true;
                (Some(Action::Submit(form)), false)
            }
            Some(LogFormEvent::Update { id, form }) => {
                state.saving = true;
                (Some(Action::SubmitEdit { id, form }), false)
            }
            Some(LogFormEvent::Cancel) => (None, true),
            None => (None, false),
        },
        Overlay::ConfirmDelete(confirm) => match confirm.handle_event(event) {
            Some(ConfirmEvent::Confirm(id)) => (Some(Action::ConfirmDelete(id)), true),
            Some(ConfirmEvent::Cancel) => (None, true),
            None => (None, false),
        },
        Overlay::Currency(picker) => match picker.handle_event(event) {
            Some(CurrencyPickerEvent::Select(currency)) => {
                (Some(Action::SetCurrency(currency)), true)
            }
            Some(CurrencyPickerEvent::Dismiss) => (None, true),
            None => (None, false),
        },
    }
}

fn handle_list_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    let visible = app.visible_records();
    if tui.log_list.handle_event(&event, visible.len()) {
        return None;
    }
    let selected = tui.log_list.selected_record(&visible);

    match event {
        TuiEvent::InputChar('q') => Some(Action::Quit),
        TuiEvent::InputChar('n') => {
            tui.overlay = Some(Overlay::Form(LogFormState::new(app.clock.today())));
            None
        }
        TuiEvent::InputChar('e') | TuiEvent::Submit => {
            if let Some(record) = selected {
                tui.overlay = Some(Overlay::Form(LogFormState::edit(record)));
            }
            None
        }
        TuiEvent::InputChar('d') => {
            if let Some(record) = selected {
                tui.overlay = Some(Overlay::ConfirmDelete(ConfirmDeleteState::new(
                    record.clone(),
                )));
            }
            None
        }
        TuiEvent::InputChar('c') => {
            tui.overlay = Some(Overlay::Currency(CurrencyPickerState::new(app.currency)));
            None
        }
        TuiEvent::InputChar('/') => {
            tui.focus = Focus::Search;
            None
        }
        TuiEvent::InputChar('s') => Some(Action::ToggleSort),
        TuiEvent::InputChar('x') => Some(Action::Export),
        TuiEvent::InputChar('r') => Some(Action::Refresh),
        TuiEvent::InputChar('L') => Some(Action::Logout),
        // Esc clears an active search
        TuiEvent::Escape if !app.search_term.is_empty() => {
            tui.search.clear();
            Some(Action::SetSearch(String::new()))
        }
        _ => None,
    }
}

/// Run `action` through the reducer and execute its effect.
/// Returns true when the app should quit.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    let auth_failed = matches!(action, Action::AuthCompleted(Err(_)));
    let logging_out = matches!(action, Action::Logout);
    let form_submit = matches!(action, Action::Submit(_) | Action::SubmitEdit { .. });
    // Some(accepted) for a create/update result from the current session
    let form_outcome = match &action {
        Action::Created { session, result } | Action::Updated { session, result, .. }
            if *session == app.session_generation =>
        {
            Some(result.is_ok())
        }
        _ => None,
    };

    let effect = update(app, action);

    let mut close_form = false;
    if let Some(Overlay::Form(state)) = &mut tui.overlay {
        match form_outcome {
            Some(true) => close_form = state.saving,
            Some(false) => state.saving = false,
            // Refused while another change is pending
            None if form_submit && effect == Effect::None => state.saving = false,
            None => {}
        }
    }
    if close_form {
        tui.overlay = None;
    }
    if auth_failed {
        tui.login.error = app.error.clone();
        tui.login.clear_password();
    }
    if logging_out {
        *tui = TuiState::new();
    }

    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::SpawnFetch { generation } => {
            let backend = app.backend.clone();
            spawn_call(tx, "fetch", async move {
                Action::FetchCompleted {
                    generation,
                    result: backend.fetch_records().await,
                }
            });
        }
        Effect::SpawnCreate { session, form } => {
            let backend = app.backend.clone();
            spawn_call(tx, "create", async move {
                Action::Created {
                    session,
                    result: backend.create_record(&form).await,
                }
            });
        }
        Effect::SpawnUpdate { session, id, form } => {
            let backend = app.backend.clone();
            spawn_call(tx, "update", async move {
                let result = backend.update_record(&id, &form).await;
                Action::Updated {
                    session,
                    id,
                    result,
                }
            });
        }
        Effect::SpawnDelete { session, id } => {
            let backend = app.backend.clone();
            spawn_call(tx, "delete", async move {
                let result = backend.delete_record(&id).await;
                Action::Deleted {
                    session,
                    id,
                    result,
                }
            });
        }
        Effect::SpawnLogin { email, password } => {
            let auth = app.auth.clone();
            spawn_call(tx, "login", async move {
                Action::AuthCompleted(auth.login(&email, &password).await)
            });
        }
        Effect::SpawnRegister {
            name,
            email,
            password,
        } => {
            let auth = app.auth.clone();
            spawn_call(tx, "register", async move {
                Action::AuthCompleted(auth.register(&name, &email, &password).await)
            });
        }
        Effect::WriteExport => {
            let result = write_export(&app.export_dir, app.store.records(), app.clock.today())
                .map_err(|e| e.to_string());
            return dispatch(app, tui, Action::ExportFinished(result), tx);
        }
    }
    false
}

/// Run a backend call on a tokio task and send its Action back.
fn spawn_call<F>(tx: &mpsc::Sender<Action>, label: &'static str, call: F)
where
    F: Future<Output = Action> + Send + 'static,
{
    info!("Spawning {} call", label);
    let tx = tx.clone();
    tokio::spawn(async move {
        let action = call.await;
        if tx.send(action).is_err() {
            warn!("Failed to send {} result: receiver dropped", label);
        }
    });
}
