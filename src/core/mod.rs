//! # Core Application Logic
//!
//! This module contains Fuelog's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No UI. Derived views   │
//!                    │  are pure functions.    │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │  Headless  │
//!            │  Adapter   │            │  commands  │
//!            │ (ratatui)  │            │ (main.rs)  │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`log_store`]: The record collection and its fetch/create/update/delete
//! - [`stats`]: Dashboard aggregates and the chart series
//! - [`view`]: Search filter and date sort for the list
//! - [`export`]: CSV export
//! - [`validation`]: Entry form rules
//! - [`session`]: Signed-in user and token persistence

pub mod action;
pub mod clock;
pub mod config;
pub mod currency;
pub mod export;
pub mod log_store;
pub mod session;
pub mod state;
pub mod stats;
pub mod validation;
pub mod view;
