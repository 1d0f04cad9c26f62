//! # Actions
//!
//! Everything that can happen in Fuelog becomes an `Action`.
//! User submits the form? That's `Action::Submit(form)`.
//! Backend responds? That's `Action::Created { session, result }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the adapter should
//! start. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::path::PathBuf;

use log::{debug, info, warn};

use crate::backend::{AuthResponse, BackendError, FuelLogForm, FuelLogRecord};
use crate::core::currency::Currency;
use crate::core::state::App;

#[derive(Debug)]
pub enum Action {
    /// (Re)load the collection from the backend.
    Refresh,
    FetchCompleted {
        generation: u64,
        result: Result<Vec<FuelLogRecord>, BackendError>,
    },
    Submit(FuelLogForm),
    SubmitEdit {
        id: String,
        form: FuelLogForm,
    },
    /// The user confirmed deleting `id`.
    ConfirmDelete(String),
    /// Mutation results carry the `session_generation` they were issued
    /// under; results from before a logout are dropped.
    Created {
        session: u64,
        result: Result<FuelLogRecord, BackendError>,
    },
    Updated {
        session: u64,
        id: String,
        result: Result<FuelLogRecord, BackendError>,
    },
    Deleted {
        session: u64,
        id: String,
        result: Result<(), BackendError>,
    },
    SetSearch(String),
    ToggleSort,
    SetCurrency(Currency),
    Export,
    ExportFinished(Result<PathBuf, String>),
    Login {
        email: String,
        password: String,
    },
    Register {
        name: String,
        email: String,
        password: String,
    },
    AuthCompleted(Result<AuthResponse, BackendError>),
    Logout,
    Quit,
}

/// I/O the adapter performs after `update()` returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    SpawnFetch { generation: u64 },
    SpawnCreate { session: u64, form: FuelLogForm },
    SpawnUpdate { session: u64, id: String, form: FuelLogForm },
    SpawnDelete { session: u64, id: String },
    SpawnLogin { email: String, password: String },
    SpawnRegister { name: String, email: String, password: String },
    WriteExport,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Refresh => start_fetch(app),
        Action::FetchCompleted { generation, result } => {
            if generation != app.fetch_generation {
                debug!(
                    "Dropping stale fetch result (generation {}, current {})",
                    generation, app.fetch_generation
                );
                return Effect::None;
            }
            match app.store.apply_fetch(result) {
                Ok(()) => {
                    app.error = None;
                    app.status_message = format!("Loaded {} fuel logs", app.store.len());
                }
                Err(e) => report(app, "Failed to fetch your fuel logs", &e),
            }
            Effect::None
        }
        Action::Submit(form) => {
            if refuse_if_pending(app) {
                return Effect::None;
            }
            app.pending_mutation = true;
            app.status_message = "Saving...".to_string();
            Effect::SpawnCreate {
                session: app.session_generation,
                form,
            }
        }
        Action::SubmitEdit { id, form } => {
            if refuse_if_pending(app) {
                return Effect::None;
            }
            app.pending_mutation = true;
            app.status_message = "Updating...".to_string();
            Effect::SpawnUpdate {
                session: app.session_generation,
                id,
                form,
            }
        }
        Action::ConfirmDelete(id) => {
            if refuse_if_pending(app) {
                return Effect::None;
            }
            app.pending_mutation = true;
            app.status_message = "Deleting...".to_string();
            Effect::SpawnDelete {
                session: app.session_generation,
                id,
            }
        }
        Action::Created { session, result } => {
            if stale_mutation(app, session) {
                return Effect::None;
            }
            app.pending_mutation = false;
            match result {
                Ok(record) => {
                    let date = record.date.clone();
                    app.store.apply_created(record);
                    app.error = None;
                    app.status_message = format!("Added fuel log for {date}");
                }
                Err(e) => report(app, "Failed to create fuel log", &e),
            }
            Effect::None
        }
        Action::Updated {
            session,
            id,
            result,
        } => {
            if stale_mutation(app, session) {
                return Effect::None;
            }
            app.pending_mutation = false;
            match result {
                Ok(record) => {
                    let date = record.date.clone();
                    app.store.apply_updated(&id, record);
                    app.error = None;
                    app.status_message = format!("Updated fuel log for {date}");
                }
                Err(e) => report(app, "Failed to update fuel log", &e),
            }
            Effect::None
        }
        Action::Deleted {
            session,
            id,
            result,
        } => {
            if stale_mutation(app, session) {
                return Effect::None;
            }
            app.pending_mutation = false;
            match result {
                Ok(()) => {
                    app.store.apply_deleted(&id);
                    app.error = None;
                    app.status_message = "Deleted fuel log".to_string();
                }
                Err(e) => report(app, "Failed to delete fuel log", &e),
            }
            Effect::None
        }
        Action::SetSearch(term) => {
            app.search_term = term;
            Effect::None
        }
        Action::ToggleSort => {
            app.sort_order = app.sort_order.toggle();
            app.status_message = format!("Sorted {}", app.sort_order.label());
            Effect::None
        }
        Action::SetCurrency(currency) => {
            app.currency = currency;
            app.status_message = format!("Currency: {}", currency.label());
            Effect::None
        }
        Action::Export => Effect::WriteExport,
        Action::ExportFinished(result) => {
            match result {
                Ok(path) => {
                    app.error = None;
                    app.status_message = format!("Exported to {}", path.display());
                }
                Err(e) => {
                    warn!("Export failed: {}", e);
                    app.error = Some(e.clone());
                    app.status_message = format!("Export failed: {e}");
                }
            }
            Effect::None
        }
        Action::Login { email, password } => {
            app.session.begin_auth();
            app.status_message = "Signing in...".to_string();
            Effect::SpawnLogin { email, password }
        }
        Action::Register {
            name,
            email,
            password,
        } => {
            app.session.begin_auth();
            app.status_message = "Creating account...".to_string();
            Effect::SpawnRegister {
                name,
                email,
                password,
            }
        }
        Action::AuthCompleted(result) => match app.session.finish_auth(result) {
            Ok(user) => {
                let greeting = format!("Welcome, {}!", user.name);
                app.backend.set_token(app.session.token.clone());
                app.error = None;
                let effect = start_fetch(app);
                app.status_message = greeting;
                effect
            }
            Err(e) => {
                warn!("Sign-in failed: {}", e);
                app.error = Some(e.to_string());
                app.status_message = "Sign-in failed. Check your details and try again.".to_string();
                Effect::None
            }
        },
        Action::Logout => {
            if let Err(e) = app.session.logout() {
                warn!("Logout could not clear the stored token: {}", e);
            }
            app.backend.set_token(None);
            app.store = Default::default();
            // Anything still in flight belonged to the old session.
            app.fetch_generation += 1;
            app.session_generation += 1;
            app.pending_mutation = false;
            app.search_term.clear();
            app.status_message = "Logged out".to_string();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn start_fetch(app: &mut App) -> Effect {
    app.fetch_generation += 1;
    app.store.begin_fetch();
    app.status_message = "Loading your fuel logs...".to_string();
    info!("Starting fetch (generation {})", app.fetch_generation);
    Effect::SpawnFetch {
        generation: app.fetch_generation,
    }
}

fn stale_mutation(app: &App, session: u64) -> bool {
    let stale = session != app.session_generation;
    if stale {
        debug!(
            "Dropping mutation result from session {} (current {})",
            session, app.session_generation
        );
    }
    stale
}

fn refuse_if_pending(app: &mut App) -> bool {
    if app.pending_mutation {
        app.status_message = "Please wait for the current change to finish".to_string();
    }
    app.pending_mutation
}

fn report(app: &mut App, what: &str, error: &BackendError) {
    warn!("{}: {}", what, error);
    app.error = Some(error.to_string());
    app.status_message = format!("{what}. Please try again.");
}
