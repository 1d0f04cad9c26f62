//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: Greeting, status message, spinner
//! - `StatsPanel`: The four summary cards
//! - `TrendChart`: Price per liter over time
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state in `TuiState` and emit events:
//! - `TextField`: Single-line input, the building block of the others
//! - `LogList`: Record table with selection
//! - `LogForm`: Add/edit overlay with per-field validation messages
//! - `ConfirmDialog`: Delete confirmation
//! - `CurrencyPicker`: Display currency overlay
//! - `LoginScreen`: Sign in / register
//!
//! Components receive external data as props, never by reaching into
//! `App` themselves:
//!
//! ```rust,ignore
//! // Dependencies are explicit
//! StatsPanel::new(app.stats(), app.currency).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── title_bar.rs
//! ├── stats_panel.rs
//! ├── trend_chart.rs
//! ├── log_list.rs
//! ├── log_form.rs
//! ├── confirm_dialog.rs
//! ├── currency_picker.rs
//! ├── login.rs
//! └── text_field.rs
//! ```

use ratatui::layout::{Constraint, Flex, Layout, Rect};

pub mod confirm_dialog;
pub mod currency_picker;
pub mod log_form;
pub mod log_list;
pub mod login;
pub mod stats_panel;
pub mod text_field;
pub mod title_bar;
pub mod trend_chart;

pub use confirm_dialog::{ConfirmDeleteState, ConfirmDialog, ConfirmEvent};
pub use currency_picker::{CurrencyPicker, CurrencyPickerEvent, CurrencyPickerState};
pub use log_form::{LogForm, LogFormEvent, LogFormState};
pub use log_list::{LogList, LogListState};
pub use login::{LoginEvent, LoginScreen, LoginState};
pub use stats_panel::StatsPanel;
pub use text_field::{TextField, TextFieldEvent};
pub use title_bar::TitleBar;
pub use trend_chart::TrendChart;

/// A `width` × `height` rect centered in `outer`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let [center_v] = Layout::vertical([Constraint::Length(height.min(outer.height))])
        .flex(Flex::Center)
        .areas(outer);
    let [center] = Layout::horizontal([Constraint::Length(width.min(outer.width))])
        .flex(Flex::Center)
        .areas(center_v);
    center
}
