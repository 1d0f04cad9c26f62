//! # Application State
//!
//! Core business state for Fuelog. This module contains domain logic only;
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn FuelBackend>   // record storage
//! ├── auth: Arc<dyn AuthBackend>      // login / register
//! ├── session: SessionContext         // user + bearer token
//! ├── store: LogStore                 // the record collection
//! ├── search_term: String             // list filter
//! ├── sort_order: SortOrder           // list order
//! ├── currency: Currency              // display symbol
//! ├── clock: Arc<dyn Clock>           // "today"
//! ├── status_message: String          // status bar text
//! ├── error: Option<String>           // last failure
//! ├── pending_mutation: bool          // create/update/delete in flight
//! ├── fetch_generation: u64           // latest fetch issued
//! ├── session_generation: u64         // bumped on logout
//! └── export_dir: PathBuf             // CSV destination
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! Stats, the visible list and the chart series are derived on demand.

use std::path::PathBuf;
use std::sync::Arc;

use crate::backend::{AuthBackend, FuelBackend, FuelLogRecord};
use crate::core::clock::Clock;
use crate::core::config::ResolvedConfig;
use crate::core::currency::Currency;
use crate::core::log_store::LogStore;
use crate::core::session::SessionContext;
use crate::core::stats::{StatsSnapshot, TrendPoint, compute_stats, trend_points};
use crate::core::view::{SortOrder, filter_and_sort};

pub struct App {
    pub backend: Arc<dyn FuelBackend>,
    pub auth: Arc<dyn AuthBackend>,
    pub session: SessionContext,
    pub store: LogStore,
    pub search_term: String,
    pub sort_order: SortOrder,
    pub currency: Currency,
    pub clock: Arc<dyn Clock>,
    pub status_message: String,
    pub error: Option<String>,
    /// True while a create, update or delete awaits the backend.
    pub pending_mutation: bool,
    /// Results of older fetches are discarded.
    pub fetch_generation: u64,
    /// Mutation results stamped with an older value belong to a session that
    /// has since logged out.
    pub session_generation: u64,
    pub export_dir: PathBuf,
}

impl App {
    pub fn new(
        backend: Arc<dyn FuelBackend>,
        auth: Arc<dyn AuthBackend>,
        session: SessionContext,
        clock: Arc<dyn Clock>,
    ) -> Self {
        backend.set_token(session.token.clone());
        Self {
            backend,
            auth,
            session,
            store: LogStore::new(),
            search_term: String::new(),
            sort_order: SortOrder::default(),
            currency: Currency::default(),
            clock,
            status_message: String::from("Welcome to Fuelog!"),
            error: None,
            pending_mutation: false,
            fetch_generation: 0,
            session_generation: 0,
            export_dir: PathBuf::from("."),
        }
    }

    pub fn from_config(
        backend: Arc<dyn FuelBackend>,
        auth: Arc<dyn AuthBackend>,
        session: SessionContext,
        clock: Arc<dyn Clock>,
        config: &ResolvedConfig,
    ) -> Self {
        let mut app = Self::new(backend, auth, session, clock);
        app.currency = config.currency;
        app.sort_order = config.sort_order;
        app.export_dir = config.export_dir.clone();
        app
    }

    pub fn stats(&self) -> StatsSnapshot {
        compute_stats(self.store.records(), self.clock.today())
    }

    /// Records matching the search term, in the current sort order.
    pub fn visible_records(&self) -> Vec<FuelLogRecord> {
        filter_and_sort(self.store.records(), &self.search_term, self.sort_order)
    }

    pub fn trend(&self) -> Vec<TrendPoint> {
        trend_points(self.store.records())
    }

    pub fn greeting(&self) -> String {
        match self.session.user_name() {
            Some(name) => format!("Welcome back, {name}!"),
            None => "Not signed in".to_string(),
        }
    }
}
